use prodtax_core::*;
use std::fs;
use std::sync::Arc;
use std::thread;

const KEY_LANGUAGE: &str = "en-US";

fn key_only() -> Taxonomy {
    Taxonomy::new(KEY_LANGUAGE, &[] as &[&str]).unwrap()
}

#[test]
fn test_roots_match_parentless_nodes() {
    let tx = key_only();
    let roots = tx.get_roots_category_info(KEY_LANGUAGE).unwrap();

    let parentless = tx
        .tree()
        .ids()
        .filter(|&id| tx.tree().get(id).is_some_and(CategoryNode::is_root))
        .count();
    assert_eq!(roots.len(), parentless);
    assert_eq!(roots.len(), 4);

    let mut ids: Vec<CategoryId> = roots.iter().map(|info| info.id).collect();
    ids.sort();
    assert_eq!(ids, vec![1, 8, 166, 772]);
}

#[test]
fn test_fullpath_shape_for_every_category() {
    let tx = key_only();
    for id in tx.tree().ids() {
        let info = tx.get_category_info(id, KEY_LANGUAGE).unwrap().unwrap();
        let depth = tx.tree().ancestry(id).unwrap().len() - 1;

        assert_eq!(info.fullpath.last().map(|d| d.id), Some(id));
        assert_eq!(info.fullpath.len(), depth + 1);
        let root = info.root().unwrap().id;
        assert!(tx.tree().get(root).unwrap().is_root());
    }
}

#[test]
fn test_records_round_trip_into_tree() {
    let text = String::from_utf8(EmbeddedLoader.load(&dataset_filename(KEY_LANGUAGE)).unwrap()).unwrap();
    let records = parse_records(&text).unwrap();
    let tx = key_only();

    assert_eq!(records.len(), tx.len());
    for record in &records {
        let info = tx.get_category_info(record.id, KEY_LANGUAGE).unwrap().unwrap();
        assert_eq!(info.depth(), record.ancestors.len());
        assert_eq!(info.name, record.name);
    }
}

#[test]
fn test_localized_paths() {
    let cases = [
        ("en-US", 6536, "Mature > Erotic > Pole Dancing Kits"),
        ("de-DE", 6536, "Für Erwachsene > Erotik > Pole Dance-Tanzstangenkits"),
        ("fr-FR", 6536, "Adulte > Érotisme > Kits de pole dance"),
        (
            "zh-CN",
            1594,
            "服饰 > 服装 > 西服/套装 > {燕尾服/男士晚礼服 | 西服套装 | 西裙套装}",
        ),
        (
            "en-US",
            1594,
            "Apparel & Accessories > Clothing > Suits > {Pant Suits | Skirt Suits | Tuxedos}",
        ),
    ];

    for (language, id, expected) in cases {
        let tx = Taxonomy::new(KEY_LANGUAGE, &[language]).unwrap();
        let info = tx.get_category_info(id, language).unwrap().unwrap();
        assert_eq!(info.to_string(), expected, "category {} in {}", id, language);
    }
}

#[test]
fn test_missing_translation_falls_back_to_key_language() {
    // The bundled zh-CN subset has no entries for the "Mature" branch
    let tx = Taxonomy::new(KEY_LANGUAGE, &["zh-CN"]).unwrap();
    let info = tx.get_category_info(6536, "zh-CN").unwrap().unwrap();

    assert_eq!(info.name, "Pole Dancing Kits");
    assert_eq!(info.language, "zh-CN");
    assert_eq!(info.to_string(), "Mature > Erotic > Pole Dancing Kits");
}

#[test]
fn test_structure_is_language_invariant() {
    let languages = ["de-DE", "fr-FR", "zh-CN"];
    let tx = Taxonomy::new(KEY_LANGUAGE, &languages).unwrap();

    for id in tx.tree().ids() {
        let reference = tx.get_category_info(id, KEY_LANGUAGE).unwrap().unwrap();
        for language in languages {
            let info = tx.get_category_info(id, language).unwrap().unwrap();
            assert_eq!(info.fullpath.len(), reference.fullpath.len());
            assert_eq!(
                info.child_ids().collect::<Vec<_>>(),
                reference.child_ids().collect::<Vec<_>>()
            );
        }
    }
}

#[test]
fn test_secondary_catalog_ids_are_known() {
    let text = String::from_utf8(EmbeddedLoader.load(&dataset_filename("zh-CN")).unwrap()).unwrap();
    let catalog = Catalog::from_records(&parse_records(&text).unwrap());
    let tx = key_only();

    assert!(catalog.len() < tx.len());
    assert!(catalog.ids().all(|id| tx.contains(id)));
}

#[test]
fn test_roots_in_another_language() {
    let tx = Taxonomy::new(KEY_LANGUAGE, &["de-DE"]).unwrap();
    let roots = tx.get_roots_category_info("de-DE").unwrap();

    let mut names: Vec<&str> = roots.iter().map(|info| info.name.as_str()).collect();
    names.sort();
    assert_eq!(
        names,
        vec![
            "Bekleidung & Accessoires",
            "Für Erwachsene",
            "Kunst & Unterhaltung",
            "Tiere & Tierbedarf"
        ]
    );
}

#[test]
fn test_german_as_key_language() {
    let tx = Taxonomy::new("de-DE", &["en-US"]).unwrap();
    assert_eq!(tx.key_language(), "de-DE");

    let info = tx.get_category_info(16, "en-US").unwrap().unwrap();
    assert_eq!(
        info.to_string(),
        "Arts & Entertainment > Hobbies & Creative Arts > Arts & Crafts"
    );
}

#[test]
fn test_unknown_language_fails_construction() {
    let err = Taxonomy::new(KEY_LANGUAGE, &["xx-XX"]).unwrap_err();
    assert!(matches!(err, TaxonomyError::Io { .. }));
}

#[test]
fn test_from_config_with_data_dir() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join(dataset_filename("en-US")),
        "# sample\n1 - A\n2 - A > B\n3 - A > B > C\n",
    )
    .unwrap();
    fs::write(dir.path().join(dataset_filename("sv-SE")), "1 - A-sv\n").unwrap();

    let config_path = dir.path().join("taxonomy.json");
    let config = TaxonomyConfig {
        key_language: "en-US".to_string(),
        languages: vec!["sv-SE".to_string()],
        data_dir: Some(dir.path().to_path_buf()),
    };
    save_config(&config, &config_path).unwrap();

    let tx = Taxonomy::from_config(&load_config(&config_path).unwrap()).unwrap();
    assert_eq!(tx.len(), 3);
    assert_eq!(tx.languages(), vec!["en-US".to_string(), "sv-SE".to_string()]);

    let info = tx.get_category_info(3, "sv-SE").unwrap().unwrap();
    assert_eq!(info.to_string(), "A-sv > B > C");

    let roots = tx.get_roots_category_info("en-US").unwrap();
    assert_eq!(roots.len(), 1);
    assert_eq!(roots[0].to_string(), "A > {B}");
}

#[test]
fn test_from_default_config_uses_bundled_data() {
    let tx = Taxonomy::from_config(&TaxonomyConfig::default()).unwrap();
    assert_eq!(tx.key_language(), DEFAULT_KEY_LANGUAGE);
    assert_eq!(tx.root_ids().len(), 4);
}

#[test]
fn test_concurrent_readers_with_lazy_language_load() {
    let tx = Arc::new(key_only());

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let tx = Arc::clone(&tx);
            thread::spawn(move || {
                for _ in 0..200 {
                    let info = tx.get_category_info(6536, KEY_LANGUAGE).unwrap().unwrap();
                    assert_eq!(info.fullpath.len(), 3);
                    assert_eq!(tx.get_roots_category_info(KEY_LANGUAGE).unwrap().len(), 4);
                }
            })
        })
        .collect();

    let writers: Vec<_> = ["fr-FR", "de-DE", "fr-FR"]
        .into_iter()
        .map(|language| {
            let tx = Arc::clone(&tx);
            thread::spawn(move || tx.load_language(language).unwrap())
        })
        .collect();

    for handle in readers.into_iter().chain(writers) {
        handle.join().unwrap();
    }

    assert_eq!(tx.languages().len(), 3);
    let info = tx.get_category_info(6536, "fr-FR").unwrap().unwrap();
    assert_eq!(info.name, "Kits de pole dance");
}
