mod common;

use common::assert_aggregation_close;
use rocks::{
    aggregate, properties::class_to_complex, properties::select_taxonomy_batch, select_albedo,
    select_taxonomy, weighted_average, Classification, Observation, PhysicalProperty, RocksError,
};

#[test]
fn test_albedo_neatm_tier_beats_stm() {
    let mut albedos = vec![
        Observation::new(0.140, 0.010, "STM")
            .with_year(1998)
            .with_bibref("Tedesco et al. (2002)"),
        Observation::new(0.121, 0.019, "NEATM")
            .with_year(2011)
            .with_bibref("Masiero et al. (2011)"),
        Observation::new(0.131, 0.014, "NEATM")
            .with_year(2014)
            .with_bibref("Nugent et al. (2015)"),
    ];

    let result = select_albedo(&mut albedos).unwrap();

    let inflated = [
        (0.019_f64.powi(2) + (0.1 * 0.121_f64).powi(2)).sqrt(),
        (0.014_f64.powi(2) + (0.1 * 0.131_f64).powi(2)).sqrt(),
    ];
    let expected = weighted_average(&[0.121, 0.131], &inflated).unwrap();

    assert_aggregation_close(&result, expected.0, expected.1, 1e-14);
    assert_aggregation_close(&result, 0.126799, 0.014600, 1e-5);
    assert_eq!(
        albedos.iter().map(|a| a.selected).collect::<Vec<_>>(),
        vec![false, true, true]
    );
}

#[test]
fn test_aggregate_by_property_name() {
    let property: PhysicalProperty = "diameter".parse().unwrap();
    let mut diameters = vec![
        Observation::new(939.4, 0.2, "SPACE"),
        Observation::new(952.4, 3.4, "ADAM"),
        Observation::new(0.0, 0.0, "STM"),
    ];
    let result = aggregate(property, &mut diameters).unwrap();

    assert_aggregation_close(&result, 939.4, 0.2, 1e-9);
    assert!(diameters[0].selected);
    assert!(!diameters[1].selected);
    assert!(!diameters[2].selected);
}

#[test]
fn test_aggregation_on_empty_set_fails() {
    assert_eq!(
        aggregate(PhysicalProperty::Albedo, &mut []),
        Err(RocksError::EmptyInput)
    );
    assert_eq!(weighted_average(&[], &[]), Err(RocksError::DivisionByZero));
}

#[test]
fn test_taxonomy_equal_scores_latest_wins() {
    let mut classes = vec![
        Classification::new("Sq", "bus-demeo", "visnir", "spec").with_year(2009),
        Classification::new("Sr", "bus-demeo", "visnir", "spec").with_year(2019),
    ];
    let selection = select_taxonomy(&mut classes).unwrap();

    assert_eq!(selection.class.as_deref(), Some("Sr"));
    assert_eq!(selection.complex.as_deref(), Some("S"));
    assert!(!classes[0].selected);
    assert!(classes[1].selected);
}

#[test]
fn test_taxonomy_batch_from_json() {
    let mut groups: Vec<Vec<Classification>> = serde_json::from_str(
        r#"[
            [
                {"class": "C", "scheme": "Tholen", "waverange": "VIS", "method": "Phot", "year": 1984},
                {"class": "Ch", "scheme": "Bus", "waverange": "VIS", "method": "Spec", "year": 2002}
            ],
            []
        ]"#,
    )
    .unwrap();

    let selections = select_taxonomy_batch(&mut groups).unwrap();
    assert_eq!(selections[0].class.as_deref(), Some("Ch"));
    assert_eq!(selections[0].method.as_deref(), Some("Spec"));
    assert!(selections[1].is_none());
    assert!(groups[0][1].selected);
}

#[test]
fn test_class_to_complex_is_total() {
    for class in ["Sk", "Xc", "B", "Cgh", "Ld", "Vw"] {
        assert!(class_to_complex(class).is_some(), "{class} has no complex");
    }
    for class in ["", "sk", "Zz", "S:", "??"] {
        assert_eq!(class_to_complex(class), None);
    }
}
