//! End-to-end packing scenarios and invariants.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use stowage_core::{intersect, rect_intersect, Axis, Bin, CogParams, Constraint};
use stowage_packing::{BinModel, Item, PackConfig, Packer, Strategy};

fn cube_model(name: &str, side: Decimal, max_weight: Decimal) -> BinModel {
    BinModel::new(name, side, side, side, max_weight)
}

fn base_with_support() -> Vec<Constraint> {
    vec![
        Constraint::weight_within_limit(),
        Constraint::fits_inside_bin(),
        Constraint::no_overlap(),
        Constraint::is_supported(dec!(0.75)),
    ]
}

fn assert_physical_invariants(bin: &Bin) {
    // Containment.
    for item in bin.items() {
        for axis in Axis::ALL {
            assert!(item.position()[axis] >= dec!(0), "{} out of bin", item.name());
            assert!(
                item.position()[axis] + item.volume().size[axis] <= bin.size()[axis],
                "{} out of bin",
                item.name()
            );
        }
    }

    // Pairwise non-overlap.
    for (i, a) in bin.items().iter().enumerate() {
        for b in bin.items().iter().skip(i + 1) {
            assert!(
                !intersect(a.volume(), b.volume()),
                "{} overlaps {}",
                a.name(),
                b.name()
            );
        }
    }

    // Weight ceiling and accumulation.
    let total: Decimal = bin.items().iter().map(|i| i.weight()).sum();
    assert_eq!(total, bin.weight());
    assert!(bin.weight() <= bin.max_weight());
}

fn assert_supported(bin: &Bin, minimum_support: Decimal) {
    for item in bin.items() {
        if item.position().y == dec!(0) {
            continue;
        }
        let base_area = item.width() * item.depth();
        let contact: Decimal = bin
            .items()
            .iter()
            .filter(|other| other.name() != item.name() && other.top() == item.position().y)
            .map(|other| rect_intersect(other.volume(), item.volume(), Axis::X, Axis::Z))
            .sum();
        assert!(
            contact >= minimum_support * base_area,
            "{} is not sufficiently supported",
            item.name()
        );
    }
}

#[test]
fn single_cube_in_single_bin() {
    let mut packer = Packer::new();
    packer.add_fleet(vec![cube_model("bin", dec!(10), dec!(100))]);
    packer.add_batch(vec![Item::new("cube", dec!(5), dec!(5), dec!(5), dec!(10))]);

    packer
        .pack(&stowage_packing::base_constraints(), &PackConfig::default())
        .unwrap();

    assert_eq!(packer.configuration().len(), 1);
    let bin = &packer.configuration()[0];
    assert_eq!(bin.items().len(), 1);
    assert_eq!(bin.items()[0].position(), stowage_packing::Vector3::ZERO);
    assert!(packer.unfitted().is_empty());

    let stats = packer.statistics();
    assert_eq!(stats.loaded_volume, dec!(125));
    assert_eq!(stats.loaded_weight, dec!(10));
    assert_eq!(stats.average_volume, dec!(0.125));
}

#[test]
fn slabs_stack_in_one_bin() {
    let mut packer = Packer::new();
    packer.set_default_bin(cube_model("bin", dec!(10), dec!(100)));
    packer.add_batch(vec![
        Item::new("a", dec!(10), dec!(5), dec!(10), dec!(10)),
        Item::new("b", dec!(10), dec!(5), dec!(10), dec!(10)),
    ]);

    packer
        .pack(&stowage_packing::base_constraints(), &PackConfig::default())
        .unwrap();

    assert_eq!(packer.configuration().len(), 1);
    let bin = &packer.configuration()[0];
    assert_eq!(bin.items().len(), 2);

    let mut levels: Vec<Decimal> = bin.items().iter().map(|i| i.position().y).collect();
    levels.sort();
    assert_eq!(levels, vec![dec!(0), dec!(5)]);
    assert_physical_invariants(bin);
}

#[test]
fn insufficient_support_rejects_and_falls_back_to_floor() {
    // Direct rejection: a box resting on only half its base fails the 0.75
    // support threshold.
    let mut bin = Bin::new(0, cube_model("bin", dec!(10), dec!(100)));
    let constraints = base_with_support();
    let mut base = Item::new("base", dec!(4), dec!(4), dec!(4), dec!(5));
    base.set_position(stowage_packing::Vector3::ZERO);
    assert!(bin.put_item(base, &constraints).is_ok());

    let mut offset = Item::new("offset", dec!(4), dec!(4), dec!(4), dec!(5));
    offset.set_position(stowage_packing::Vector3::new(dec!(2), dec!(4), dec!(0)));
    assert!(bin.put_item(offset, &constraints).is_err());

    // Driver-level fallback: both cubes end on the floor instead.
    let mut packer = Packer::new();
    packer.set_default_bin(cube_model("bin", dec!(10), dec!(100)));
    packer.add_batch(vec![
        Item::new("a", dec!(4), dec!(4), dec!(4), dec!(5)),
        Item::new("b", dec!(4), dec!(4), dec!(4), dec!(5)),
    ]);
    packer.pack(&base_with_support(), &PackConfig::default()).unwrap();

    assert_eq!(packer.configuration().len(), 1);
    let bin = &packer.configuration()[0];
    assert_eq!(bin.items().len(), 2);
    assert_supported(bin, dec!(0.75));
    assert_physical_invariants(bin);
}

#[test]
fn asymmetric_load_keeps_center_of_gravity_in_tolerance() {
    let mut items = Vec::new();
    for i in 0..5 {
        items.push(Item::new(
            format!("heavy_{i}"),
            dec!(0.4),
            dec!(0.4),
            dec!(0.4),
            dec!(80),
        ));
    }
    for i in 0..15 {
        items.push(Item::new(
            format!("light_{i}"),
            dec!(0.5),
            dec!(0.5),
            dec!(0.5),
            dec!(3),
        ));
    }

    let mut packer = Packer::new();
    packer.set_default_bin(BinModel::new("van", dec!(2), dec!(2), dec!(3), dec!(1000)));
    packer.add_batch(items);

    let mut constraints = base_with_support();
    constraints.push(Constraint::maintain_center_of_gravity(CogParams::default()));
    let config = PackConfig::default().with_strategy(Strategy::MultiAnchor);
    packer.pack(&constraints, &config).unwrap();

    assert!(!packer.configuration().is_empty());
    for bin in packer.configuration() {
        assert!(!bin.items().is_empty());
        assert_physical_invariants(bin);
        assert_supported(bin, dec!(0.75));

        // Tolerance at the final load ratio.
        let load_ratio = bin.weight() / bin.max_weight();
        let scale = dec!(1) - load_ratio * dec!(0.7);
        let tol_x = bin.width() * dec!(0.2) * scale;
        let tol_z = bin.depth() * dec!(0.2) * scale;

        let cog = bin.center_of_gravity();
        assert!((cog.x - bin.width() / dec!(2)).abs() <= tol_x);
        assert!((cog.z - bin.depth() * dec!(0.4)).abs() <= tol_z);
    }
}

#[test]
fn greedy_deviates_at_least_as_much_as_multi_anchor() {
    // A row of cubes in a wide, shallow bin with a loose CoG window: the
    // corner-point placer fills from the left wall outward, the anchor set
    // has the full row to choose from. Deviation from the X centre under
    // greedy must not be smaller than under multi-anchor.
    let items = || {
        (0..4)
            .map(|i| Item::new(format!("c{i}"), dec!(2), dec!(2), dec!(2), dec!(5)))
            .collect::<Vec<_>>()
    };
    let model = || BinModel::new("row", dec!(10), dec!(2), dec!(2), dec!(100));
    let mut constraints = base_with_support();
    constraints.push(Constraint::maintain_center_of_gravity(
        CogParams::default().with_tol_x(dec!(0.5)).with_tol_z(dec!(0.5)),
    ));

    let deviation = |strategy: Strategy| -> Decimal {
        let mut packer = Packer::new();
        packer.set_default_bin(model());
        packer.add_batch(items());
        let config = PackConfig::default().with_strategy(strategy);
        packer.pack(&constraints, &config).unwrap();

        assert_eq!(packer.configuration().len(), 1);
        let bin = &packer.configuration()[0];
        assert_eq!(bin.items().len(), 4);
        (bin.center_of_gravity().x - bin.width() / dec!(2)).abs()
    };

    let greedy_dev = deviation(Strategy::Greedy);
    let multi_dev = deviation(Strategy::MultiAnchor);
    assert!(greedy_dev >= multi_dev);
}

#[test]
fn fleet_exhaustion_reports_unfitted() {
    let mut packer = Packer::new();
    packer.add_fleet(vec![
        cube_model("first", dec!(10), dec!(100)),
        cube_model("second", dec!(10), dec!(100)),
    ]);
    packer.add_batch(vec![
        Item::new("a", dec!(10), dec!(10), dec!(10), dec!(10)),
        Item::new("b", dec!(10), dec!(10), dec!(10), dec!(10)),
        Item::new("c", dec!(10), dec!(10), dec!(10), dec!(10)),
    ]);

    packer
        .pack(&stowage_packing::base_constraints(), &PackConfig::default())
        .unwrap();

    assert_eq!(packer.configuration().len(), 2);
    for bin in packer.configuration() {
        assert_eq!(bin.items().len(), 1);
    }
    assert_eq!(packer.unfitted().len(), 1);
}

#[test]
fn zero_progress_bin_stops_the_pack() {
    let mut packer = Packer::new();
    packer.set_default_bin(cube_model("small", dec!(10), dec!(100)));
    packer.add_batch(vec![Item::new("huge", dec!(20), dec!(20), dec!(20), dec!(10))]);

    packer
        .pack(&stowage_packing::base_constraints(), &PackConfig::default())
        .unwrap();

    assert!(packer.configuration().is_empty());
    assert_eq!(packer.unfitted().len(), 1);
}

#[test]
fn incremental_cog_matches_recomputation() {
    // The constraint's incremental update and the bin's full recomputation
    // must agree at the pack's precision for every commit along the way.
    let mut bin = Bin::new(0, cube_model("bin", dec!(10), dec!(100)));
    let positions = [
        (dec!(0), dec!(0), dec!(0)),
        (dec!(6), dec!(0), dec!(2)),
        (dec!(3), dec!(0), dec!(6)),
    ];
    for (i, (x, y, z)) in positions.iter().enumerate() {
        let mut item = Item::new(format!("i{i}"), dec!(3), dec!(3), dec!(3), dec!(7));
        item.set_position(stowage_packing::Vector3::new(*x, *y, *z));

        let current = bin.center_of_gravity();
        let future_weight = bin.weight() + item.weight();
        let incremental_x =
            (current.x * bin.weight() + item.center().x * item.weight()) / future_weight;
        let incremental_z =
            (current.z * bin.weight() + item.center().z * item.weight()) / future_weight;

        bin.commit_item(item);
        let recomputed = bin.center_of_gravity();
        assert_eq!(incremental_x.round_dp(3), recomputed.x.round_dp(3));
        assert_eq!(incremental_z.round_dp(3), recomputed.z.round_dp(3));
    }
}

fn random_batch(count: usize, seed: u64) -> Vec<Item> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|i| {
            let w = Decimal::from(rng.gen_range(1..=4u32));
            let h = Decimal::from(rng.gen_range(1..=4u32));
            let d = Decimal::from(rng.gen_range(1..=4u32));
            let weight = Decimal::from(rng.gen_range(1..=8u32));
            Item::new(format!("item_{i}"), w, h, d, weight)
        })
        .collect()
}

fn pack_random(strategy: Strategy, seed: u64) -> Packer {
    let mut packer = Packer::new();
    packer.set_default_bin(cube_model("bin", dec!(10), dec!(60)));
    packer.add_batch(random_batch(25, seed));
    let config = PackConfig::default().with_strategy(strategy);
    packer.pack(&base_with_support(), &config).unwrap();
    packer
}

#[test]
fn random_batches_respect_invariants_under_both_strategies() {
    for strategy in [Strategy::Greedy, Strategy::MultiAnchor] {
        let packer = pack_random(strategy, 42);

        // Conservation: every input item is placed exactly once or unfitted.
        let mut names: Vec<String> = packer
            .configuration()
            .iter()
            .flat_map(|bin| bin.items().iter().map(|i| i.name().to_string()))
            .chain(packer.unfitted().iter().map(|i| i.name().to_string()))
            .collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 25);

        for bin in packer.configuration() {
            assert_physical_invariants(bin);
            assert_supported(bin, dec!(0.75));
        }
    }
}

#[test]
fn identical_inputs_produce_identical_configurations() {
    for strategy in [Strategy::Greedy, Strategy::MultiAnchor] {
        let first = pack_random(strategy, 7);
        let second = pack_random(strategy, 7);

        assert_eq!(first.configuration().len(), second.configuration().len());
        for (a, b) in first
            .configuration()
            .iter()
            .zip(second.configuration().iter())
        {
            assert_eq!(a.items().len(), b.items().len());
            for (x, y) in a.items().iter().zip(b.items().iter()) {
                assert_eq!(x.name(), y.name());
                assert_eq!(x.position(), y.position());
                assert_eq!(x.volume().size, y.volume().size);
            }
        }
    }
}
