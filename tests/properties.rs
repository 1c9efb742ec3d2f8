use bendtree::bends::decompose;
use bendtree::geo::{Coord, LineString};
use bendtree::{analyze, AnalysisConfig, BendError, ClassifierConfig, HeadTailClassifier, StoppingRule};
use proptest::prelude::*;

fn curve_strategy() -> impl Strategy<Value = Vec<Coord<f64>>> {
    prop::collection::vec((-1000i32..1000, -1000i32..1000), 2..80).prop_map(|pts| {
        pts.into_iter()
            .map(|(x, y)| Coord {
                x: f64::from(x),
                y: f64::from(y),
            })
            .collect()
    })
}

fn rule_strategy() -> impl Strategy<Value = StoppingRule> {
    prop_oneof![
        Just(StoppingRule::MeanThreshold),
        Just(StoppingRule::MeanRatioThreshold),
    ]
}

fn break_percentage_strategy() -> impl Strategy<Value = f64> {
    prop_oneof![Just(1.0), 0.01f64..=1.0]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn classifier_terminates_with_increasing_cuts(
        // A small pool keeps duplicates common; 7.1 and 0.35 average to
        // slightly below themselves.
        values in prop::collection::vec(
            prop::sample::select(vec![0.35, 1.0, 2.5, 7.1, 10.0, 100.0]),
            1..40,
        ),
        rule in rule_strategy(),
        break_percentage in break_percentage_strategy(),
    ) {
        let classifier = HeadTailClassifier::new(ClassifierConfig { break_percentage, rule }).unwrap();
        let c = classifier.classify(&values).unwrap();
        let h = c.hierarchy_depth();
        prop_assert!(h >= 1);
        prop_assert_eq!(c.cuts()[0], 0.0);
        prop_assert!(c.cuts().windows(2).all(|w| w[0] < w[1]), "cuts {:?}", c.cuts());
        prop_assert_eq!(c.levels().len(), values.len());
        for level in c.levels() {
            prop_assert!(matches!(level, Some(l) if (1..=h).contains(l)), "level {:?} outside 1..={}", level, h);
        }
    }

    #[test]
    fn bend_count_is_bounded(points in curve_strategy(), tolerance in 0.0f64..300.0) {
        let bends = decompose(&points, tolerance);
        prop_assert!(bends.len() <= points.len() - 2);
        for bend in &bends {
            prop_assert!(bend.distance() > tolerance);
            prop_assert!(bend.baseline_start() != bend.baseline_end());
        }
    }

    #[test]
    fn larger_tolerance_never_adds_bends(
        points in curve_strategy(),
        t1 in 0.1f64..200.0,
        extra in 0.0f64..200.0,
    ) {
        let t2 = t1 + extra;
        prop_assert!(decompose(&points, t2).len() <= decompose(&points, t1).len());
    }

    #[test]
    fn collinear_triples_never_bend(
        origin in (-500i32..500, -500i32..500),
        dir in (-20i32..20, -20i32..20),
        k in (0i32..50, 1i32..50, 1i32..50),
        tolerance in 0.0f64..10.0,
    ) {
        // Ordered along the line so the middle point projects inside the chord.
        let (k0, step1, step2) = k;
        let at = |s: i32| Coord {
            x: f64::from(origin.0 + s * dir.0),
            y: f64::from(origin.1 + s * dir.1),
        };
        let pts = [at(k0), at(k0 + step1), at(k0 + step1 + step2)];
        prop_assert!(decompose(&pts, tolerance).is_empty());
    }

    #[test]
    fn analysis_is_deterministic(
        curves in prop::collection::vec(curve_strategy(), 1..6),
        tolerance in 1.0f64..100.0,
        rule in rule_strategy(),
    ) {
        let curves: Vec<LineString<f64>> = curves.into_iter().map(LineString::new).collect();
        let config = AnalysisConfig {
            tolerance,
            classifier: ClassifierConfig { rule, ..ClassifierConfig::default() },
        };
        match (analyze(&curves, &config), analyze(&curves, &config)) {
            (Ok(a), Ok(b)) => {
                prop_assert_eq!(&a.bends, &b.bends);
                prop_assert_eq!(&a.metrics, &b.metrics);
                prop_assert_eq!(a.classification.cuts(), b.classification.cuts());
            }
            (Err(BendError::EmptyDistribution), Err(BendError::EmptyDistribution)) => {}
            (a, b) => prop_assert!(false, "diverging results: {:?} vs {:?}", a.err(), b.err()),
        }
    }

    #[test]
    fn metrics_match_bends(
        curves in prop::collection::vec(curve_strategy(), 1..6),
        tolerance in 1.0f64..100.0,
        rule in rule_strategy(),
        break_percentage in 0.05f64..1.0,
    ) {
        let curves: Vec<LineString<f64>> = curves.into_iter().map(LineString::new).collect();
        let config = AnalysisConfig {
            tolerance,
            classifier: ClassifierConfig { break_percentage, rule },
        };
        let Ok(analysis) = analyze(&curves, &config) else {
            return Ok(());
        };
        let m = &analysis.metrics;
        prop_assert_eq!(m.s, analysis.bends.len());
        prop_assert_eq!(m.l, m.s * m.h);
        prop_assert_eq!(m.h, analysis.classification.hierarchy_depth());
        prop_assert_eq!(m.counts_by_level.len(), m.h);
        prop_assert_eq!(m.counts_by_level.values().sum::<usize>(), m.s);
        prop_assert!(analysis.bends.iter().all(|b| b.length() > 0.0));
        prop_assert!(analysis.bends.iter().all(|b| b.class_level().is_some()));
        prop_assert!(analysis.classification.cuts().windows(2).all(|w| w[0] < w[1]));
    }
}

#[test]
fn long_curve_does_not_overflow() {
    // Sawtooth with a growing amplitude: every split lands next to the end
    // of its range, so the split tree is about as deep as the curve is long.
    let points: Vec<Coord<f64>> = (0..10_000)
        .map(|i| {
            let x = f64::from(i);
            let amp = 1.0 + x * 1e-2;
            let y = if i % 2 == 0 { 0.0 } else { amp };
            Coord { x, y }
        })
        .collect();
    let bends = decompose(&points, 0.5);
    assert!(!bends.is_empty());
    assert!(bends.len() <= points.len() - 2);
}
