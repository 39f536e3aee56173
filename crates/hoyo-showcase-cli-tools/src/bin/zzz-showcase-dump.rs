use anyhow::Result;
use hoyo_showcase::importer::enka_network::{ApiEndpoint, Client, ClientBuilder};
use hoyo_showcase_cli_tools::cli_helpers;
use jsonxf::Formatter;
use std::{fs, io::Read, path::Path};

pub(crate) mod args {
    use bpaf::*;
    use hoyo_showcase_cli_tools::cli_helpers;
    use std::path::PathBuf;

    #[derive(Debug, Clone)]
    pub(crate) struct Options {
        pub(crate) enka_api_base: Option<String>,
        pub(crate) out_dir: PathBuf,
        pub(crate) uid: String,
    }

    pub fn options() -> OptionParser<Options> {
        let enka_api_base = cli_helpers::enka_api_base_parser();
        let out_dir = long("out-dir")
            .help("Directory to write the fixtures to")
            .argument::<PathBuf>("DIR")
            .fallback(PathBuf::from("tests/fixtures/latest"))
            .debug_fallback();
        let uid = cli_helpers::uid_parser();
        construct!(Options {
            enka_api_base,
            out_dir,
            uid
        })
        .to_options()
        .descr("A tool to fetch a Zenless Zone Zero showcase and the asset store from https://enka.network/ as test fixtures")
    }

    #[test]
    fn zzz_showcase_dump_check_options() {
        options().check_invariants(false)
    }
}

async fn fetch_to_fixture(
    client: &Client,
    formatter: &mut Formatter,
    out_dir: &Path,
    endpoint: &ApiEndpoint,
) -> Result<()> {
    let mut data = String::new();
    let filename = fixture_filename(endpoint);
    client.fetch(endpoint).await?.read_to_string(&mut data)?;
    let data = formatter.format(&data).map_err(anyhow::Error::msg)?;
    fs::write(
        out_dir.join(filename),
        // Not sure why there's a leading newline here. jsonxf docs don't show it.
        data.trim_start(),
    )?;
    Ok(())
}

fn fixture_filename(endpoint: &ApiEndpoint) -> String {
    use ApiEndpoint::*;
    match endpoint {
        ZzzShowcase(_) => "showcase.json".to_string(),

        ZzzAvatars => "avatars.json".to_string(),
        ZzzWeapons => "weapons.json".to_string(),
        ZzzLocs => "locs.json".to_string(),
        ZzzPfps => "pfps.json".to_string(),

        Other(path) => format!("other_{}.json", path.replace('/', "_")),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    cli_helpers::init_tracing();
    let args = args::options().run();
    let uid = cli_helpers::parse_uid(&args.uid)?;

    let mut client = ClientBuilder::new();
    if let Some(api_base) = args.enka_api_base {
        client = client.api_base(api_base);
    }
    let client = client.build()?;

    let mut formatter = Formatter::pretty_printer();
    formatter.indent = "    ".to_string();
    formatter.trailing_output = "\n".to_string();

    fs::create_dir_all(&args.out_dir)?;

    for endpoint in [
        ApiEndpoint::ZzzShowcase(uid),
        ApiEndpoint::ZzzAvatars,
        ApiEndpoint::ZzzWeapons,
        ApiEndpoint::ZzzLocs,
        ApiEndpoint::ZzzPfps,
    ] {
        fetch_to_fixture(&client, &mut formatter, &args.out_dir, &endpoint).await?;
    }

    Ok(())
}

#[test]
fn zzz_showcase_dump_fixture_names() {
    assert_eq!(
        fixture_filename(&ApiEndpoint::ZzzShowcase(1300012345)),
        "showcase.json"
    );
    assert_eq!(fixture_filename(&ApiEndpoint::ZzzLocs), "locs.json");
    assert_eq!(
        fixture_filename(&ApiEndpoint::Other("api/zzz/uid/1".to_string())),
        "other_api_zzz_uid_1.json"
    );
}
