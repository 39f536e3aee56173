use super::*;

use lazy_static_include::*;

lazy_static_include_bytes! {
    SHOWCASE => "tests/fixtures/zzz/showcase.json",
    AVATARS => "tests/fixtures/zzz/avatars.json",
    WEAPONS => "tests/fixtures/zzz/weapons.json",
    LOCS => "tests/fixtures/zzz/locs.json",
    PFPS => "tests/fixtures/zzz/pfps.json",
}

fn fixture_builder() -> ShowcaseBuilder {
    ShowcaseBuilder::new()
        .showcase_from_reader(SHOWCASE.as_ref())
        .avatars_from_reader(AVATARS.as_ref())
        .weapons_from_reader(WEAPONS.as_ref())
        .locs_from_reader(LOCS.as_ref())
        .pfps_from_reader(PFPS.as_ref())
}

#[test]
fn symbolic_labels() {
    assert_eq!(Element::from("Elec"), Symbolic::Known(ElementKind::Electric));
    assert_eq!(Element::from("Elec").label(), "ELECTRIC");
    assert_eq!(Element::from("Physics").label(), "PHYSICAL");
    assert_eq!(Element::from("Fire").label(), "FIRE");
    assert_eq!(
        Element::from("AuricInk"),
        Symbolic::Raw("AuricInk".to_string())
    );
    assert_eq!(Element::from("AuricInk").label(), "AuricInk");

    assert_eq!(Specialty::from("Anomaly").label(), "ANOMALY");
    assert_eq!(Specialty::from("Mystery").label(), "Mystery");
}

#[test]
fn stat_types_from_prop_ids() {
    assert_eq!(
        StatType::from_prop_id("11101"),
        Symbolic::Known(StatKind::HpBase)
    );
    assert_eq!(StatType::from_prop_id("21101").label(), "CRIT_DMG_BASE");
    assert_eq!(StatType::from_prop_id("31201").label(), "ANOMALY_PROFICIENCY_BASE");
    assert_eq!(StatType::from_prop_id("99901").label(), "99901");
    assert_eq!(StatType::from_prop_id("not-a-number").label(), "not-a-number");
}

#[test]
fn rarity_letters() {
    assert_eq!(rarity_letter(4), Some("S"));
    assert_eq!(rarity_letter(3), Some("A"));
    assert_eq!(rarity_letter(2), Some("B"));
    assert_eq!(rarity_letter(9), None);
}

#[test]
fn decode_empty() {
    let showcase = Showcase::decode(
        &ShowcaseResponse::default(),
        &Assets::default(),
        Language::English,
    );
    assert_eq!(showcase, Showcase::default());
}

#[tokio::test]
async fn test_showcase_null_import() {
    let showcase = ShowcaseBuilder::new().build().await.unwrap();
    assert!(showcase.player.is_none());
    assert!(showcase.agents.is_empty());
    assert!(showcase.ttl.is_none());
}

#[tokio::test]
async fn test_showcase_fixture_import() {
    let showcase = fixture_builder()
        .language(Language::English)
        .build()
        .await
        .unwrap();

    assert_eq!(showcase.ttl, Some(60));

    let player = showcase.player.as_ref().unwrap();
    assert_eq!(player.nickname.as_deref(), Some("Proxy"));
    assert_eq!(player.level, Some(60));
    assert_eq!(player.signature.as_deref(), Some("Hello, Inter-Knot"));
    assert_eq!(
        player.avatar.as_deref(),
        Some("https://enka.network/ui/zzz/IconInterKnotRole0021.png")
    );

    assert_eq!(showcase.agents.len(), 3);

    let soldier = &showcase.agents[0];
    assert_eq!(soldier.id, Some(1041));
    assert_eq!(soldier.name.as_deref(), Some("Soldier 11"));
    assert_eq!(soldier.level, Some(60));
    assert_eq!(soldier.mindscape, Some(2));
    assert_eq!(soldier.rarity.as_deref(), Some("S"));
    assert_eq!(soldier.rarity_num, Some(4));
    assert_eq!(soldier.elements, vec![Symbolic::Known(ElementKind::Fire)]);
    assert_eq!(
        soldier.specialty,
        Some(Symbolic::Known(SpecialtyKind::Attack))
    );
    assert_eq!(soldier.stats.len(), 7);
    assert_eq!(
        soldier.icon.as_deref(),
        Some("https://enka.network/ui/zzz/IconRoleCrop04.png")
    );
    let engine = soldier.w_engine.as_ref().unwrap();
    assert_eq!(engine.id, Some(14104));
    assert_eq!(engine.name.as_deref(), Some("The Brimstone"));
    assert_eq!(engine.level, Some(60));
    assert_eq!(engine.rank, Some(1));
    assert_eq!(engine.refinement, None);
    assert_eq!(engine.rarity, Some(4));

    let anby = &showcase.agents[1];
    assert_eq!(anby.name.as_deref(), Some("Anby"));
    assert_eq!(anby.rarity.as_deref(), Some("A"));
    assert!(anby.w_engine.is_none());
    // Sorted by label, unknown property ids kept as-is
    assert!(anby
        .stats
        .windows(2)
        .all(|pair| pair[0].stat_type.label() <= pair[1].stat_type.label()));
    assert!(anby
        .stats
        .iter()
        .any(|stat| stat.stat_type == Symbolic::Raw("99901".to_string()) && stat.value == 7.0));

    // Not in the asset store: only what the payload itself carries
    let unknown = &showcase.agents[2];
    assert_eq!(unknown.id, Some(9999));
    assert_eq!(unknown.level, Some(1));
    assert!(unknown.name.is_none());
    assert!(unknown.rarity.is_none());
    assert!(unknown.rarity_num.is_none());
    assert!(unknown.elements.is_empty());
    assert!(unknown.stats.is_empty());
    let unknown_engine = unknown.w_engine.as_ref().unwrap();
    assert!(unknown_engine.name.is_none());
    assert!(unknown_engine.rarity.is_none());
}

#[tokio::test]
async fn test_showcase_localized_import() {
    let showcase = fixture_builder()
        .language(Language::TraditionalChinese)
        .build()
        .await
        .unwrap();
    assert_eq!(showcase.agents[0].name.as_deref(), Some("11號"));
    assert_eq!(
        showcase.agents[0].w_engine.as_ref().unwrap().name.as_deref(),
        Some("硫磺石")
    );

    // No Japanese table in the fixture
    let showcase = fixture_builder()
        .language(Language::Japanese)
        .build()
        .await
        .unwrap();
    assert!(showcase.agents.iter().all(|agent| agent.name.is_none()));
}

#[tokio::test]
async fn test_showcase_profile_picture_lookup() {
    let pfps = r#"{"3200002": {"Icon": "/ui/zzz/A.png"}, "2021": {"Icon": "/ui/zzz/B.png"}}"#;
    let avatar_of = |profile_detail: &'static str| async move {
        let showcase = format!(
            r#"{{"PlayerInfo": {{"SocialDetail": {{"ProfileDetail": {profile_detail}}}}}}}"#
        );
        ShowcaseBuilder::new()
            .showcase_from_reader(std::io::Cursor::new(showcase))
            .pfps_from_reader(pfps.as_bytes())
            .build()
            .await
            .unwrap()
            .player
            .unwrap()
            .avatar
    };

    assert_eq!(
        avatar_of(r#"{"ProfileId": 3200002, "AvatarId": 2021}"#).await.as_deref(),
        Some("https://enka.network/ui/zzz/A.png")
    );
    // Older payloads without ProfileId
    assert_eq!(
        avatar_of(r#"{"AvatarId": 2021}"#).await.as_deref(),
        Some("https://enka.network/ui/zzz/B.png")
    );
    assert_eq!(avatar_of(r#"{"ProfileId": 1}"#).await, None);
}

#[tokio::test]
async fn test_showcase_malformed_agent() {
    let showcase = ShowcaseBuilder::new()
        .language(Language::English)
        .showcase_from_reader(
            r#"{"PlayerInfo": {"ShowcaseDetail": {"AvatarList": [
                {"Id": 1041, "Level": 60},
                {"Id": 1011, "TalentLevel": "2"},
                {"Id": 1041, "Level": 50}
            ]}}}"#
                .as_bytes(),
        )
        .avatars_from_reader(AVATARS.as_ref())
        .locs_from_reader(LOCS.as_ref())
        .build()
        .await
        .unwrap();

    assert_eq!(showcase.agents.len(), 3);
    assert!(showcase.agents[0].decode_error.is_none());
    assert_eq!(showcase.agents[2].level, Some(50));

    let malformed = &showcase.agents[1];
    assert_eq!(malformed.id, Some(1011));
    assert_eq!(malformed.name.as_deref(), Some("Anby"));
    assert_eq!(malformed.level, None);
    assert!(malformed.decode_error.is_some());
}

#[tokio::test]
async fn test_showcase_bad_reader() {
    ShowcaseBuilder::new()
        .showcase_from_reader("not json".as_bytes())
        .build()
        .await
        .unwrap_err();
}
