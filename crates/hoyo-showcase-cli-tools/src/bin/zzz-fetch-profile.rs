use anyhow::Result;
use hoyo_showcase::{
    importer::enka_network::ClientBuilder, language::Language, profile,
    showcase::ShowcaseBuilder,
};
use hoyo_showcase_cli_tools::cli_helpers;

pub(crate) mod args {
    use bpaf::*;
    use hoyo_showcase_cli_tools::cli_helpers;

    #[derive(Debug, Clone)]
    pub(crate) enum Action {
        Fetch { lang: String, uid: String },
    }

    #[derive(Debug, Clone)]
    pub(crate) struct Options {
        pub(crate) enka_api_base: Option<String>,
        pub(crate) action: Action,
    }

    pub fn options() -> OptionParser<Options> {
        let lang = cli_helpers::language_parser();
        let uid = cli_helpers::uid_parser();
        let fetch = construct!(Action::Fetch { lang, uid })
            .to_options()
            .descr("Fetch player profile and showcase agents")
            .command("fetch");

        let enka_api_base = cli_helpers::enka_api_base_parser();
        let action = fetch;
        construct!(Options {
            enka_api_base,
            action
        })
        .to_options()
        .descr("Fetch a Zenless Zone Zero player profile from Enka.Network")
        .header("Prints SUCCESS:<json> or ERROR:<message> on stdout.")
    }

    #[test]
    fn zzz_fetch_profile_check_options() {
        options().check_invariants(false)
    }

    #[test]
    fn zzz_fetch_profile_parses_fetch() {
        let parsed = options()
            .run_inner(&["fetch", "1300012345", "--lang", "en"])
            .unwrap();
        assert!(parsed.enka_api_base.is_none());
        let Action::Fetch { lang, uid } = parsed.action;
        assert_eq!(lang, "en");
        assert_eq!(uid, "1300012345");
    }

    #[test]
    fn zzz_fetch_profile_requires_uid() {
        options().run_inner(&["fetch"]).unwrap_err();
        options().run_inner(&["list", "1"]).unwrap_err();
    }
}

async fn fetch_profile(uid: &str, lang: &str, enka_api_base: Option<String>) -> Result<String> {
    let numeric_uid = cli_helpers::parse_uid(uid)?;

    let mut client = ClientBuilder::new();
    if let Some(api_base) = enka_api_base {
        client = client.api_base(api_base);
    }

    let showcase = ShowcaseBuilder::new()
        .uid(numeric_uid)
        .language(Language::from_code(lang))
        .enka(client)
        .build()
        .await?;

    let profile = profile::normalize(uid, &showcase);
    Ok(serde_json::to_string(&profile)?)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    cli_helpers::init_tracing();
    let args = args::options().run();

    match args.action {
        args::Action::Fetch { lang, uid } => {
            cli_helpers::report(fetch_profile(&uid, &lang, args.enka_api_base).await)
        }
    }
}
