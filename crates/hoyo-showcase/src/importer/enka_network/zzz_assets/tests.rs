use super::*;

use lazy_static_include::*;

lazy_static_include_bytes! {
    AVATARS => "tests/fixtures/zzz/avatars.json",
    WEAPONS => "tests/fixtures/zzz/weapons.json",
    LOCS => "tests/fixtures/zzz/locs.json",
    PFPS => "tests/fixtures/zzz/pfps.json",
}

#[test]
fn parse_empty_stores() {
    assert!(read_avatars("{}".as_bytes()).unwrap().is_empty());
    assert!(read_weapons("{}".as_bytes()).unwrap().is_empty());
    assert!(read_locs("{}".as_bytes()).unwrap().is_empty());
    assert!(read_pfps("{}".as_bytes()).unwrap().is_empty());
    read_avatars(std::io::empty()).unwrap_err();
}

#[test]
fn parse_fixture_avatars() {
    let avatars = read_avatars(AVATARS.as_ref()).unwrap();
    assert_eq!(avatars.len(), 2);

    let anby = &avatars["1011"];
    assert_eq!(anby.name.as_deref(), Some("Avatar_Female_Size02_Anby"));
    assert_eq!(anby.rarity, Some(3));
    assert_eq!(anby.profession_type.as_deref(), Some("Stun"));
    assert_eq!(anby.element_types, vec!["Elec".to_string()]);
    assert_eq!(anby.base_props.len(), 7);
    assert_eq!(anby.base_props["21101"], 5000.0);
}

#[test]
fn parse_avatars_drops_malformed_entries() {
    let avatars = read_avatars(
        r#"{
            "1011": {"Name": "Avatar_Female_Size02_Anby", "Rarity": 3, "ElementTypes": ["Elec"]},
            "1021": {"Name": "Avatar_Female_Size01_Nekomata", "Rarity": "S"},
            "1031": {"Name": "Avatar_Female_Size02_Nicole", "ElementTypes": null},
            "1041": "not an object"
        }"#
        .as_bytes(),
    )
    .unwrap();
    assert_eq!(avatars.len(), 1);
    assert_eq!(avatars["1011"].rarity, Some(3));
    assert!(!avatars.contains_key("1021"));
}

#[test]
fn parse_weapons_drops_malformed_entries() {
    let weapons = read_weapons(
        r#"{"14104": {"ItemName": "Item_Weapon_S_Soldier11", "Rarity": 4}, "14001": {"Rarity": -1}}"#
            .as_bytes(),
    )
    .unwrap();
    assert_eq!(weapons.len(), 1);
    assert_eq!(weapons["14104"].rarity, Some(4));

    // The table itself must still be an object
    read_weapons("[]".as_bytes()).unwrap_err();
}

#[test]
fn parse_fixture_weapons() {
    let weapons = read_weapons(WEAPONS.as_ref()).unwrap();
    let brimstone = &weapons["14104"];
    assert_eq!(brimstone.item_name.as_deref(), Some("Item_Weapon_S_Soldier11"));
    assert_eq!(brimstone.rarity, Some(4));
}

#[test]
fn localize_from_fixture() {
    let assets = Assets {
        locs: read_locs(LOCS.as_ref()).unwrap(),
        pfps: read_pfps(PFPS.as_ref()).unwrap(),
        ..Default::default()
    };

    assert_eq!(
        assets.localize("en", "Avatar_Female_Size02_Anby"),
        Some("Anby")
    );
    assert_eq!(
        assets.localize("zh-tw", "Item_Weapon_S_Soldier11"),
        Some("硫磺石")
    );
    assert_eq!(assets.localize("ja", "Avatar_Female_Size02_Anby"), None);
    assert_eq!(assets.localize("en", "Avatar_Unreleased"), None);
    assert_eq!(
        assets.pfps["3200001"].icon.as_deref(),
        Some("/ui/zzz/IconInterKnotRole0021.png")
    );
}
