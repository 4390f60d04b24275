use vending_risk::demand::{DemandKind, PoissonDemand};
use vending_risk::model::{FleetItem, ItemDemandProfile, ItemRecord};
use vending_risk::simulation::{
    run_cycle, CycleConfig, FleetRaceConfig, FleetRaceSimulator, RiskTier,
};

fn poisson_item(name: &str, par: u32, mean: f64) -> FleetItem {
    FleetItem::new(name, par, Box::new(PoissonDemand::new(mean)))
}

#[test]
fn steady_item_with_par_equal_to_cycle_mean() {
    let config = CycleConfig::default()
        .with_days_between_visits(7)
        .with_lead_time_days(0.0)
        .with_par_level(35)
        .with_simulations(10_000)
        .with_seed(2024);
    let result = run_cycle(config, ItemDemandProfile::new("Cola", 5.0, 0.0)).unwrap();

    assert_eq!(result.demand_kind, DemandKind::Poisson);
    assert_eq!(result.effective_inventory, 35);
    assert!(
        (34..=36).contains(&result.avg_cycle_demand),
        "avg {}",
        result.avg_cycle_demand
    );
    // P(Poisson(35) > 35) is about 0.455.
    assert!(
        result.stockout_probability > 0.40 && result.stockout_probability < 0.55,
        "stockout {}",
        result.stockout_probability
    );
    assert!((result.availability + result.stockout_probability - 1.0).abs() < 1e-12);
    assert_eq!(result.risk_tier, RiskTier::High);
}

#[test]
fn empty_slots_exhaust_on_day_one() {
    let items = vec![
        poisson_item("a", 0, 2.0),
        poisson_item("b", 0, 0.5),
        poisson_item("c", 0, 7.0),
    ];
    let config = FleetRaceConfig::default()
        .with_simulations(200)
        .with_max_days(30)
        .with_series(true)
        .with_seed(1);
    let summary = FleetRaceSimulator::new(items, config).unwrap().run().unwrap();

    let series = summary.series.unwrap();
    assert!(series.iter().all(|r| r.days_to_exhaustion == 1));
    assert_eq!(summary.days_to_exhaustion.p95, 1.0);
}

#[test]
fn fast_sellers_with_single_units_exhaust_on_day_one() {
    let items = vec![
        poisson_item("a", 1, 10.0),
        poisson_item("b", 1, 10.0),
        poisson_item("c", 1, 10.0),
    ];
    let config = FleetRaceConfig::default()
        .with_simulations(50)
        .with_max_days(10)
        .with_exhaustion_milestone(3)
        .with_seed(10);
    let summary = FleetRaceSimulator::new(items, config).unwrap().run().unwrap();

    assert_eq!(summary.days_to_exhaustion.mean, 1.0);
    assert_eq!(summary.exhaustion_reached_probability, 1.0);
    assert!(summary.item_exhaustion.iter().all(|e| e.frequency == 1.0));
}

#[test]
fn fixed_seed_reproduces_cycle_results() {
    let config = CycleConfig::default()
        .with_par_level(30)
        .with_simulations(3_000)
        .with_series(true)
        .with_seed(99);
    let profile = ItemDemandProfile::new("Chips", 1.2, 2.1);

    let first = run_cycle(config.clone(), profile.clone()).unwrap();
    let second = run_cycle(config, profile).unwrap();

    assert_eq!(first.demand_kind, DemandKind::NegativeBinomial);
    assert_eq!(first.simulated_sales, second.simulated_sales);
    assert_eq!(first.p95_cycle_demand.to_bits(), second.p95_cycle_demand.to_bits());
    assert_eq!(first.stockout_probability.to_bits(), second.stockout_probability.to_bits());
}

#[test]
fn fixed_seed_reproduces_race_summaries() {
    let records = vec![
        ItemRecord {
            item_name: "Cola".into(),
            avg_daily_sales: 1.4,
            daily_std: 2.0,
            par_level: 12,
            capacity: None,
        },
        ItemRecord {
            item_name: "Chips".into(),
            avg_daily_sales: 0.9,
            daily_std: 0.5,
            par_level: 8,
            capacity: None,
        },
        ItemRecord {
            item_name: "Gum".into(),
            avg_daily_sales: 0.4,
            daily_std: 1.1,
            par_level: 6,
            capacity: None,
        },
        ItemRecord {
            item_name: "Water".into(),
            avg_daily_sales: 2.2,
            daily_std: 1.0,
            par_level: 15,
            capacity: None,
        },
    ];
    let run = || {
        let fleet: Vec<FleetItem> = records.iter().map(FleetItem::from_record).collect();
        let config = FleetRaceConfig::default()
            .with_simulations(2_000)
            .with_max_days(120)
            .with_volume_milestone(40)
            .with_series(true)
            .with_seed(7);
        FleetRaceSimulator::new(fleet, config).unwrap().run().unwrap()
    };

    let a = run();
    let b = run();
    assert_eq!(a.days_to_exhaustion, b.days_to_exhaustion);
    assert_eq!(a.days_to_volume, b.days_to_volume);
    assert_eq!(a.item_exhaustion, b.item_exhaustion);
    assert_eq!(a.series, b.series);
    assert_eq!(
        a.volume_before_exhaustion_probability,
        b.volume_before_exhaustion_probability
    );

    // Attribution counts at most `exhaustion_milestone` items per trial.
    let attributed: usize = a.item_exhaustion.iter().map(|e| e.count).sum();
    assert!(attributed <= a.trials * a.exhaustion_milestone);
}
