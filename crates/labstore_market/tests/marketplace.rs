//! End-to-end marketplace scenarios over a directory-backed store.

use chrono::Utc;
use labstore_market::model::{Identity, LabAccount, Offer};
use labstore_market::{commission_split, MarketError, Marketplace};
use serde_json::json;
use tempfile::tempdir;

fn lab(id: &str, email: &str, name: &str) -> LabAccount {
    LabAccount {
        identity: Identity {
            id: id.into(),
            email: email.into(),
            name: name.into(),
            phone: None,
            address: None,
            created_at: Utc::now(),
        },
        lab_name: name.into(),
        license: "LIC-0000".into(),
        nurses: vec![],
        commission: 0.12,
    }
}

fn offer(id: &str, lab_id: &str, price: f64) -> Offer {
    Offer {
        id: id.into(),
        lab_id: lab_id.into(),
        title: "Offre découverte".into(),
        description: "Bilan à prix réduit".into(),
        price,
        image_url: None,
        active: true,
        requires_admin_approval: None,
        approved: None,
        created_at: Utc::now(),
    }
}

#[test]
fn fresh_marketplace_seeds_then_survives_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("market");

    // First run: storage empty, directory hydrates to its seed
    {
        let market = Marketplace::open(&path).unwrap();
        let labs = market.laboratories();
        assert_eq!(labs.list().len(), 2);

        labs.add(lab("lab_999", "contact@nouveau.ma", "Nouveau Labo"))
            .unwrap();
        assert_eq!(labs.list().len(), 3);
        assert_eq!(labs.list().last().unwrap().identity.id, "lab_999");
    }

    // Second run: same three entries, in order
    {
        let market = Marketplace::open(&path).unwrap();
        let ids: Vec<String> = market
            .laboratories()
            .list()
            .iter()
            .map(|l| l.identity.id.clone())
            .collect();
        assert_eq!(ids, vec!["lab_biocentral", "lab_atlas", "lab_999"]);
    }
}

#[test]
fn price_update_touches_one_field() {
    let market = Marketplace::open_in_memory().unwrap();
    let catalog = market.catalog();

    let before = catalog.test_by_id("test_nfs").unwrap();
    catalog
        .update_test("test_nfs", json!({ "price": 150.0 }))
        .unwrap();

    let after = catalog.test_by_id("test_nfs").unwrap();
    assert_eq!(after.price, 150.0);
    assert_eq!(after.name, before.name);
    assert_eq!(after.category, before.category);
    assert_eq!(after.duration, before.duration);
}

#[test]
fn offers_filter_by_laboratory() {
    let market = Marketplace::open_in_memory().unwrap();

    for i in 0..3 {
        market
            .publish_offer(offer(&format!("off_a{i}"), "lab_biocentral", 150.0))
            .unwrap();
    }
    for i in 0..2 {
        market
            .publish_offer(offer(&format!("off_b{i}"), "lab_atlas", 120.0))
            .unwrap();
    }

    let biocentral = market.offers().by_lab("lab_biocentral");
    assert_eq!(biocentral.len(), 3);
    assert!(biocentral.iter().all(|o| o.lab_id == "lab_biocentral"));
    assert_eq!(market.offers().by_lab("lab_atlas").len(), 2);
}

#[test]
fn publishing_for_unknown_laboratory_is_rejected() {
    let market = Marketplace::open_in_memory().unwrap();

    let result = market.publish_offer(offer("off_1", "lab_ghost", 99.0));
    assert!(matches!(
        result,
        Err(MarketError::UnknownLaboratory { .. })
    ));
    assert!(market.offers().list().is_empty());
}

#[test]
fn deleting_a_laboratory_keeps_its_offers() {
    let market = Marketplace::open_in_memory().unwrap();
    market
        .publish_offer(offer("off_1", "lab_atlas", 120.0))
        .unwrap();

    market.laboratories().remove("lab_atlas").unwrap();

    // No cascade: the offer dangles, by design of the informal references
    assert_eq!(market.offers().by_lab("lab_atlas").len(), 1);
}

#[test]
fn session_survives_restart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("market");

    {
        let market = Marketplace::open(&path).unwrap();
        market.accounts().sign_in("amina@example.com").unwrap();
    }

    {
        let market = Marketplace::open(&path).unwrap();
        let user = market.accounts().current_user().unwrap();
        assert_eq!(user.identity().id, "patient_amina");
    }

    {
        let market = Marketplace::open(&path).unwrap();
        market.accounts().sign_out().unwrap();
    }

    {
        let market = Marketplace::open(&path).unwrap();
        assert!(!market.accounts().is_authenticated());
    }
}

#[test]
fn commission_preview_matches_directory_rate() {
    let market = Marketplace::open_in_memory().unwrap();

    let rate = market
        .laboratories()
        .by_id("lab_biocentral")
        .unwrap()
        .commission;
    let split = commission_split(200.0, rate);

    assert!((split.commission - 30.0).abs() < 1e-9);
    assert!((split.net - 170.0).abs() < 1e-9);
    assert!((split.commission + split.net - 200.0).abs() < 1e-9);
}

#[test]
fn catalog_faq_and_orders_share_one_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("market");

    {
        let market = Marketplace::open(&path).unwrap();
        market
            .faq()
            .add("Question ?", "Réponse.", vec!["divers".into()])
            .unwrap();
    }

    let market = Marketplace::open(&path).unwrap();
    assert_eq!(market.faq().list().first().unwrap().question, "Question ?");
    // Every collection key is present on disk after first open
    let keys = market.store().keys().unwrap();
    for key in [
        "complaints",
        "faq",
        "laboratories",
        "offers",
        "orders",
        "packs",
        "tests",
        "users",
    ] {
        assert!(keys.contains(&key.to_string()), "missing key {key}");
    }
}
