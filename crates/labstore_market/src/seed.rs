//! Static default data sets.
//!
//! Each collection is initialized from these on its first-ever hydration
//! (key confirmed absent). They are demo data for a fresh install; offers,
//! orders, and complaints start empty.

use crate::model::{
    AdminAccount, AgentAccount, AgentType, FaqEntry, Gender, Identity, LabAccount, Nurse,
    PatientAccount, Test, TestPack, User,
};
use chrono::{DateTime, TimeZone, Utc};

fn launch_date() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
}

fn identity(id: &str, email: &str, name: &str, phone: Option<&str>, address: Option<&str>) -> Identity {
    Identity {
        id: id.into(),
        email: email.into(),
        name: name.into(),
        phone: phone.map(Into::into),
        address: address.map(Into::into),
        created_at: launch_date(),
    }
}

/// Starter analysis catalog.
#[must_use]
pub fn tests() -> Vec<Test> {
    let test = |id: &str, name: &str, description: &str, category: &str, price: f64, duration: &str, preparation: Option<&str>| Test {
        id: id.into(),
        name: name.into(),
        description: description.into(),
        category: category.into(),
        price,
        duration: duration.into(),
        preparation: preparation.map(Into::into),
        image_url: None,
        requires_prescription: None,
    };

    vec![
        test(
            "test_nfs",
            "Numération formule sanguine",
            "Comptage complet des cellules sanguines.",
            "Hématologie",
            120.0,
            "24h",
            None,
        ),
        test(
            "test_gly",
            "Glycémie à jeun",
            "Mesure du glucose sanguin.",
            "Biochimie",
            60.0,
            "24h",
            Some("À jeun 8h minimum"),
        ),
        test(
            "test_lip",
            "Bilan lipidique",
            "Cholestérol total, HDL, LDL et triglycérides.",
            "Biochimie",
            180.0,
            "24h",
            Some("À jeun 12h"),
        ),
        test(
            "test_tsh",
            "TSH ultrasensible",
            "Dépistage des troubles thyroïdiens.",
            "Hormonologie",
            150.0,
            "48h",
            None,
        ),
        test(
            "test_fer",
            "Ferritine",
            "Évaluation des réserves en fer.",
            "Biochimie",
            140.0,
            "48h",
            None,
        ),
        test(
            "test_ecbu",
            "ECBU",
            "Examen cytobactériologique des urines.",
            "Microbiologie",
            110.0,
            "72h",
            Some("Recueil du premier jet du matin"),
        ),
    ]
}

/// Starter test packs.
#[must_use]
pub fn packs() -> Vec<TestPack> {
    vec![
        TestPack {
            id: "pack_bilan".into(),
            name: "Bilan complet".into(),
            description: "Le bilan annuel recommandé : NFS, glycémie, lipides et TSH.".into(),
            tests: vec![
                "test_nfs".into(),
                "test_gly".into(),
                "test_lip".into(),
                "test_tsh".into(),
            ],
            price: 430.0,
            discount: 15.0,
            image_url: None,
        },
        TestPack {
            id: "pack_fatigue".into(),
            name: "Bilan fatigue".into(),
            description: "NFS, ferritine et TSH pour explorer une fatigue persistante.".into(),
            tests: vec!["test_nfs".into(), "test_fer".into(), "test_tsh".into()],
            price: 350.0,
            discount: 15.0,
            image_url: None,
        },
    ]
}

/// Starter laboratory directory.
#[must_use]
pub fn laboratories() -> Vec<LabAccount> {
    vec![
        LabAccount {
            identity: identity(
                "lab_biocentral",
                "contact@biocentral.ma",
                "BioCentral SARL",
                Some("+212 5 22 44 55 66"),
                Some("12 Bd Zerktouni, Casablanca"),
            ),
            lab_name: "BioCentral".into(),
            license: "LIC-2021-0458".into(),
            nurses: vec![
                Nurse {
                    id: "nurse_samira".into(),
                    name: "Samira El Fassi".into(),
                    phone: "+212 6 61 22 33 44".into(),
                    license: "INF-1204".into(),
                    availability: vec!["Lun-Ven 8h-14h".into()],
                },
                Nurse {
                    id: "nurse_youssef".into(),
                    name: "Youssef Berrada".into(),
                    phone: "+212 6 62 33 44 55".into(),
                    license: "INF-2087".into(),
                    availability: vec!["Mar-Sam 9h-17h".into()],
                },
            ],
            commission: 0.15,
        },
        LabAccount {
            identity: identity(
                "lab_atlas",
                "contact@atlas-analyses.ma",
                "Atlas Analyses",
                Some("+212 5 37 70 80 90"),
                Some("4 Av. Fal Ould Oumeir, Rabat"),
            ),
            lab_name: "Atlas Analyses".into(),
            license: "LIC-2019-0112".into(),
            nurses: vec![Nurse {
                id: "nurse_khadija".into(),
                name: "Khadija Amrani".into(),
                phone: "+212 6 63 44 55 66".into(),
                license: "INF-3319".into(),
                availability: vec!["Lun-Ven 8h-16h".into()],
            }],
            commission: 0.10,
        },
    ]
}

/// Starter accounts: demo patients, the laboratory accounts, one admin,
/// and the support team.
#[must_use]
pub fn users() -> Vec<User> {
    let mut users = vec![
        User::Patient(PatientAccount {
            identity: identity(
                "patient_amina",
                "amina@example.com",
                "Amina Alaoui",
                Some("+212 6 10 20 30 40"),
                Some("8 Rue Ibn Sina, Casablanca"),
            ),
            date_of_birth: Some("1990-04-12".into()),
            gender: Some(Gender::F),
            blood_type: Some("O+".into()),
            allergies: None,
            medical_history: None,
        }),
        User::Patient(PatientAccount {
            identity: identity(
                "patient_karim",
                "karim@example.com",
                "Karim Bennis",
                Some("+212 6 11 21 31 41"),
                None,
            ),
            date_of_birth: Some("1984-11-02".into()),
            gender: Some(Gender::M),
            blood_type: None,
            allergies: Some(vec!["pénicilline".into()]),
            medical_history: None,
        }),
        User::Admin(AdminAccount {
            identity: identity("admin_root", "admin@labstore.ma", "Administrateur", None, None),
            permissions: vec!["catalog".into(), "users".into(), "commissions".into()],
        }),
        User::Agent(AgentAccount {
            identity: identity(
                "agent_nadia",
                "nadia@labstore.ma",
                "Nadia Chraibi",
                None,
                None,
            ),
            department: "Support client".into(),
            agent_type: AgentType::Support,
            assigned_complaints: 0,
            managed_agent_ids: None,
        }),
        User::Agent(AgentAccount {
            identity: identity(
                "agent_omar",
                "omar@labstore.ma",
                "Omar Tazi",
                None,
                None,
            ),
            department: "Support client".into(),
            agent_type: AgentType::Manager,
            assigned_complaints: 0,
            managed_agent_ids: Some(vec!["agent_nadia".into()]),
        }),
    ];

    // Laboratory accounts sign in with the same identities as the directory
    users.extend(laboratories().into_iter().map(User::Laboratory));
    users
}

/// Starter FAQ.
#[must_use]
pub fn faq() -> Vec<FaqEntry> {
    let entry = |id: &str, question: &str, answer: &str, tags: &[&str]| FaqEntry {
        id: id.into(),
        question: question.into(),
        answer: answer.into(),
        tags: tags.iter().map(|t| (*t).into()).collect(),
        updated_at: launch_date(),
    };

    vec![
        entry(
            "faq_domicile",
            "Comment réserver un prélèvement à domicile ?",
            "Depuis le catalogue, ajoutez vos analyses au panier, validez la commande et choisissez \"Prélèvement à domicile\". Le laboratoire confirmera ensuite votre rendez-vous.",
            &["commande", "prélèvement", "domicile"],
        ),
        entry(
            "faq_delais",
            "Sous combien de temps reçois-je mes résultats ?",
            "Selon le type d'analyse et le laboratoire choisi, la plupart des résultats sont disponibles sous 24 à 72h. Vous serez notifié dès leur publication.",
            &["résultats", "délais"],
        ),
        entry(
            "faq_annulation",
            "Puis-je annuler ma commande ?",
            "Oui, vous pouvez annuler votre commande jusqu'à 24h avant le prélèvement. Des frais d'annulation peuvent s'appliquer selon les conditions du laboratoire.",
            &["annulation", "commande"],
        ),
        entry(
            "faq_support",
            "Comment contacter le support client ?",
            "Notre support client est disponible du lundi au vendredi de 9h à 18h, par email, téléphone ou via la messagerie de l'application.",
            &["support", "contact"],
        ),
        entry(
            "faq_donnees",
            "Mes données personnelles sont-elles protégées ?",
            "Vos données médicales sont chiffrées et accessibles uniquement aux professionnels autorisés, conformément à la réglementation en vigueur.",
            &["confidentialité", "données"],
        ),
        entry(
            "faq_partenaire",
            "Comment devenir laboratoire partenaire ?",
            "Contactez notre équipe commerciale depuis la page d'inscription laboratoire. Nous vous accompagnerons dans l'intégration de vos équipes.",
            &["partenariat", "laboratoire"],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use labstore_core::Record;
    use std::collections::BTreeSet;

    fn unique_ids<T: Record>(records: &[T]) -> bool {
        let ids: BTreeSet<&str> = records.iter().map(Record::id).collect();
        ids.len() == records.len()
    }

    #[test]
    fn seed_ids_are_unique() {
        assert!(unique_ids(&tests()));
        assert!(unique_ids(&packs()));
        assert!(unique_ids(&laboratories()));
        assert!(unique_ids(&users()));
        assert!(unique_ids(&faq()));
    }

    #[test]
    fn pack_members_resolve_in_catalog() {
        let catalog: BTreeSet<String> = tests().iter().map(|t| t.id.clone()).collect();
        for pack in packs() {
            for member in &pack.tests {
                assert!(catalog.contains(member), "{member} missing from catalog");
            }
        }
    }

    #[test]
    fn laboratory_accounts_mirror_directory() {
        let directory: BTreeSet<String> =
            laboratories().iter().map(|l| l.identity.id.clone()).collect();
        let lab_users: BTreeSet<String> = users()
            .iter()
            .filter(|u| u.as_laboratory().is_some())
            .map(|u| Record::id(u).to_string())
            .collect();
        assert_eq!(directory, lab_users);
    }

    #[test]
    fn seed_emails_are_unique() {
        let emails: BTreeSet<String> = users()
            .iter()
            .map(|u| u.email().to_lowercase())
            .collect();
        assert_eq!(emails.len(), users().len());
    }
}
