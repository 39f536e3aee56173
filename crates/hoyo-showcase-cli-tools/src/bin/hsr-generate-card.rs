use anyhow::{anyhow, Result};
use hoyo_showcase::importer::card_renderer::{CardClient, CardClientBuilder, CardRequest};
use hoyo_showcase_cli_tools::cli_helpers;
use std::path::{Path, PathBuf};

pub(crate) mod args {
    use bpaf::*;
    use hoyo_showcase_cli_tools::cli_helpers;
    use std::path::PathBuf;

    #[derive(Debug, Clone)]
    pub(crate) enum Action {
        Generate {
            character_id: Option<String>,
            output: Option<PathBuf>,
            output_dir: Option<PathBuf>,
            lang: String,
            template: u8,
            uid: String,
        },
        GenerateAll {
            output_dir: PathBuf,
            lang: String,
            template: u8,
            uid: String,
        },
        List {
            lang: String,
            uid: String,
        },
    }

    #[derive(Debug, Clone)]
    pub(crate) struct Options {
        pub(crate) renderer_url: Option<String>,
        pub(crate) action: Action,
    }

    fn output_dir_parser() -> impl Parser<PathBuf> {
        long("output-dir")
            .help("Directory to save cards in, as <character_id>.png")
            .argument::<PathBuf>("DIR")
    }

    fn generate() -> impl Parser<Action> {
        // Checked by hand rather than by bpaf, so a missing flag is still an ERROR: line
        let character_id = short('c')
            .long("character_id")
            .long("character-id")
            .help("Character ID, e.g. 1004 (required)")
            .argument::<String>("CHARACTER_ID")
            .optional();
        let output = short('o')
            .long("output")
            .help("Output file path, e.g. ../temp/card_123.png")
            .argument::<PathBuf>("OUTPUT")
            .optional();
        let output_dir = output_dir_parser().optional();
        let lang = cli_helpers::language_parser();
        let template = cli_helpers::template_parser();
        let uid = cli_helpers::uid_parser();
        construct!(Action::Generate {
            character_id,
            output,
            output_dir,
            lang,
            template,
            uid
        })
        .to_options()
        .descr("Render one character's card and save it as a PNG")
        .command("generate")
    }

    fn generate_all() -> impl Parser<Action> {
        let output_dir = output_dir_parser();
        let lang = cli_helpers::language_parser();
        let template = cli_helpers::template_parser();
        let uid = cli_helpers::uid_parser();
        construct!(Action::GenerateAll {
            output_dir,
            lang,
            template,
            uid
        })
        .to_options()
        .descr("Render every showcase character's card into a directory")
        .command("generate-all")
    }

    fn list() -> impl Parser<Action> {
        let lang = cli_helpers::language_parser();
        let uid = cli_helpers::uid_parser();
        construct!(Action::List { lang, uid })
            .to_options()
            .descr("List showcase characters")
            .command("list")
    }

    pub fn options() -> OptionParser<Options> {
        let renderer_url = cli_helpers::renderer_url_parser();
        let generate = generate();
        let generate_all = generate_all();
        let list = list();
        let action = construct!([generate, generate_all, list]);
        construct!(Options {
            renderer_url,
            action
        })
        .to_options()
        .descr("Generate Honkai: Star Rail character cards")
        .header("Prints SUCCESS:<path or json> or ERROR:<message> on stdout.")
    }

    #[test]
    fn hsr_generate_card_check_options() {
        options().check_invariants(false)
    }

    #[test]
    fn hsr_generate_card_parses_generate() {
        let parsed = options()
            .run_inner(&[
                "--renderer-url",
                "http://127.0.0.1:8000",
                "generate",
                "800123456",
                "--character_id",
                "1004",
                "-o",
                "../temp/card_123.png",
            ])
            .unwrap();
        assert_eq!(parsed.renderer_url.as_deref(), Some("http://127.0.0.1:8000"));
        match parsed.action {
            Action::Generate {
                character_id,
                output,
                output_dir,
                lang,
                template,
                uid,
            } => {
                assert_eq!(character_id.as_deref(), Some("1004"));
                assert_eq!(output, Some(PathBuf::from("../temp/card_123.png")));
                assert!(output_dir.is_none());
                assert_eq!(lang, "cht");
                assert_eq!(template, 2);
                assert_eq!(uid, "800123456");
            }
            other => panic!("unexpected action {other:?}"),
        }
    }

    #[test]
    fn hsr_generate_card_generate_flags_optional_at_parse() {
        // Missing flags are reported by main, not by the parser
        let parsed = options().run_inner(&["generate", "800123456"]).unwrap();
        assert!(matches!(
            parsed.action,
            Action::Generate {
                character_id: None,
                output: None,
                ..
            }
        ));
    }

    #[test]
    fn hsr_generate_card_parses_list() {
        let parsed = options()
            .run_inner(&["list", "800123456", "--lang", "en"])
            .unwrap();
        assert!(matches!(
            parsed.action,
            Action::List { ref lang, ref uid } if lang == "en" && uid == "800123456"
        ));
    }

    #[test]
    fn hsr_generate_card_rejects_bad_template() {
        options()
            .run_inner(&["generate-all", "800123456", "--output-dir", "cards", "-t", "5"])
            .unwrap_err();
    }
}

const MISSING_GENERATE_FLAGS: &str = "--character_id and --output (or --output-dir) are required for generate action";

fn card_client(renderer_url: Option<String>) -> Result<CardClient> {
    let renderer_url = renderer_url.ok_or_else(|| {
        anyhow!("No card renderer configured, set --renderer-url or CARD_RENDERER_URL")
    })?;
    Ok(CardClientBuilder::new(renderer_url).build()?)
}

async fn generate_card(
    client: Result<CardClient>,
    uid: &str,
    character_id: &str,
    output_path: &Path,
    lang: &str,
    template: u8,
) -> Result<String> {
    let cards = client?
        .create(&CardRequest {
            uid,
            lang,
            style: template,
        })
        .await?;

    cards.card_for(character_id)?.save_png(output_path)?;
    Ok(output_path.display().to_string())
}

async fn generate_all_cards(
    client: Result<CardClient>,
    uid: &str,
    output_dir: &Path,
    lang: &str,
    template: u8,
) -> Result<String> {
    let cards = client?
        .create(&CardRequest {
            uid,
            lang,
            style: template,
        })
        .await?;

    // Reuse the list check so an empty showcase is an error, not an empty array
    cards.summaries()?;

    // Check every id before writing anything
    let targets = cards
        .cards
        .iter()
        .map(|card| Ok((card, output_dir.join(card.file_name()?))))
        .collect::<hoyo_showcase::Result<Vec<_>>>()?;

    let mut paths = Vec::with_capacity(targets.len());
    for (card, path) in targets {
        card.save_png(&path)?;
        paths.push(path.display().to_string());
    }
    Ok(serde_json::to_string(&paths)?)
}

async fn list_characters(client: Result<CardClient>, uid: &str, lang: &str) -> Result<String> {
    let cards = client?
        .create(&CardRequest {
            uid,
            lang,
            style: hoyo_showcase::importer::card_renderer::DEFAULT_TEMPLATE,
        })
        .await?;

    Ok(serde_json::to_string(&cards.summaries()?)?)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    cli_helpers::init_tracing();
    let args = args::options().run();
    let client = card_client(args.renderer_url);

    match args.action {
        args::Action::Generate {
            character_id,
            output,
            output_dir,
            lang,
            template,
            uid,
        } => {
            let target: Option<(String, PathBuf)> = character_id.and_then(|character_id| {
                cli_helpers::card_output_path(
                    &character_id,
                    output.as_deref(),
                    output_dir.as_deref(),
                )
                .map(|path| (character_id, path))
            });
            let Some((character_id, output_path)) = target else {
                println!("{}", cli_helpers::error_line(MISSING_GENERATE_FLAGS));
                std::process::exit(1);
            };
            cli_helpers::report(
                generate_card(client, &uid, &character_id, &output_path, &lang, template).await,
            )
        }
        args::Action::GenerateAll {
            output_dir,
            lang,
            template,
            uid,
        } => cli_helpers::report(
            generate_all_cards(client, &uid, &output_dir, &lang, template).await,
        ),
        args::Action::List { lang, uid } => {
            cli_helpers::report(list_characters(client, &uid, &lang).await)
        }
    }
}
