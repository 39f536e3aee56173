use bpaf::*;
use hoyo_showcase::{
    importer::card_renderer::{DEFAULT_TEMPLATE, TEMPLATES},
    language::Language,
    Error,
};
use itertools;
use std::fmt::Display;
use std::path::{Path, PathBuf};
use strum::VariantNames;
use tracing_subscriber::EnvFilter;

pub const DEFAULT_LANGUAGE: &str = "cht";

// Per https://github.com/pacak/bpaf/discussions/197
pub fn language_parser() -> impl Parser<String> {
    let mut help_msg = Doc::from("Language code.\n One of ");

    // TODO: intersperse will move into the core library at some point.
    // https://github.com/rust-lang/rust/issues/79524
    for (index, &text) in itertools::intersperse(Language::VARIANTS, &", ").enumerate() {
        if index % 2 == 0 {
            help_msg.literal(text)
        } else {
            help_msg.text(text)
        }
    }
    help_msg.text("; also zh-TW, zh-CN. Unknown codes are treated as ");
    help_msg.literal(DEFAULT_LANGUAGE);

    short('l')
        .long("lang")
        .help(help_msg)
        .argument::<String>("LANG")
        .fallback(DEFAULT_LANGUAGE.to_string())
        .display_fallback()
}

pub fn uid_parser() -> impl Parser<String> {
    positional::<String>("UID").help("Player UID, e.g. 1300012345")
}

pub fn template_parser() -> impl Parser<u8> {
    short('t')
        .long("template")
        .help("Card template style, 1 to 3")
        .argument::<u8>("TEMPLATE")
        .guard(|template| TEMPLATES.contains(template), "template must be 1, 2 or 3")
        .fallback(DEFAULT_TEMPLATE)
        .display_fallback()
}

pub fn renderer_url_parser() -> impl Parser<Option<String>> {
    long("renderer-url")
        .env("CARD_RENDERER_URL")
        .help("Base URL of the card rendering service")
        .argument::<String>("URL")
        .optional()
}

pub fn enka_api_base_parser() -> impl Parser<Option<String>> {
    long("enka-api-base")
        .env("ENKA_API_BASE")
        .help("Override https://enka.network/, e.g. for a mirror")
        .argument::<String>("URL")
        .optional()
}

/// UIDs are numeric upstream; anything else is reported rather than sent.
pub fn parse_uid(uid: &str) -> Result<u64, Error> {
    uid.trim()
        .parse()
        .map_err(|_| Error::InvalidUid(uid.to_string()))
}

/// Where `generate` writes its card: the literal `output`, else `<output_dir>/<character_id>.png`.
pub fn card_output_path(
    character_id: &str,
    output: Option<&Path>,
    output_dir: Option<&Path>,
) -> Option<PathBuf> {
    match (output, output_dir) {
        (Some(output), _) => Some(output.to_path_buf()),
        (None, Some(dir)) => Some(dir.join(format!("{character_id}.png"))),
        (None, None) => None,
    }
}

/// Diagnostics go to stderr, and only when RUST_LOG asks for them; stdout is reserved for the result line.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();
}

pub fn success_line(payload: impl Display) -> String {
    format!("SUCCESS:{payload}")
}

pub fn error_line(message: impl Display) -> String {
    format!("ERROR:{message}")
}

/// Prints the single result line callers parse.
pub fn report(outcome: anyhow::Result<String>) {
    match outcome {
        Ok(payload) => println!("{}", success_line(payload)),
        Err(error) => {
            tracing::debug!(?error, "failed");
            println!("{}", error_line(error))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uid_parsing() {
        assert_eq!(parse_uid("1300012345").unwrap(), 1300012345);
        assert_eq!(parse_uid(" 800123456\n").unwrap(), 800123456);
        assert_eq!(
            parse_uid("abc").unwrap_err().to_string(),
            "Invalid UID abc"
        );
        parse_uid("").unwrap_err();
        parse_uid("-1").unwrap_err();
    }

    #[test]
    fn output_paths() {
        assert_eq!(
            card_output_path("1004", Some(Path::new("../temp/card_123.png")), None),
            Some(PathBuf::from("../temp/card_123.png"))
        );
        assert_eq!(
            card_output_path("1004", Some(Path::new("a.png")), Some(Path::new("cards"))),
            Some(PathBuf::from("a.png"))
        );
        assert_eq!(
            card_output_path("1004", None, Some(Path::new("cards"))),
            Some(Path::new("cards").join("1004.png"))
        );
        assert_eq!(card_output_path("1004", None, None), None);
    }

    #[test]
    fn result_lines() {
        assert_eq!(success_line("temp/1004.png"), "SUCCESS:temp/1004.png");
        assert_eq!(
            error_line(anyhow::Error::new(Error::GameMaintenance)),
            "ERROR:Game is under maintenance, please try again later"
        );
    }

    #[test]
    fn language_option() {
        let parser = language_parser().to_options();
        assert_eq!(parser.run_inner(&[] as &[&str]).unwrap(), "cht");
        assert_eq!(parser.run_inner(&["--lang", "en"]).unwrap(), "en");
        assert_eq!(parser.run_inner(&["-l", "ko"]).unwrap(), "ko");
        // Unknown codes are passed through; the fallback happens at lookup
        assert_eq!(parser.run_inner(&["--lang", "fr"]).unwrap(), "fr");
        parser.check_invariants(false);
    }

    #[test]
    fn template_option() {
        let parser = template_parser().to_options();
        assert_eq!(parser.run_inner(&[] as &[&str]).unwrap(), 2);
        assert_eq!(parser.run_inner(&["-t", "3"]).unwrap(), 3);
        parser.run_inner(&["--template", "4"]).unwrap_err();
        parser.run_inner(&["--template", "0"]).unwrap_err();
    }
}
