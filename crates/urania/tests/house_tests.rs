use urania::houses::{HouseAssigner, HouseSystem, HOUSE_COUNT};

/// Minimal LCG so the sweep is reproducible without extra dependencies.
struct Lcg(u64);

impl Lcg {
    fn next_f64(&mut self) -> f64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (self.0 >> 11) as f64 / (1u64 << 53) as f64
    }
}

const CUSP_SETS: [[f64; 12]; 3] = [
    [0.0, 30.0, 60.0, 90.0, 120.0, 150.0, 180.0, 210.0, 240.0, 270.0, 300.0, 330.0],
    [92.3, 113.5, 140.2, 180.8, 220.1, 249.4, 272.3, 293.5, 320.2, 0.8, 40.1, 69.4],
    [351.2, 18.9, 47.0, 77.4, 108.3, 138.6, 171.2, 198.9, 227.0, 257.4, 288.3, 318.6],
];

fn in_interval(lon: f64, start: f64, end: f64) -> bool {
    if start <= end {
        start <= lon && lon < end
    } else {
        lon >= start || lon < end
    }
}

#[test]
fn test_every_longitude_lands_in_exactly_one_house() {
    let assigner = HouseAssigner::new();
    let mut rng = Lcg(0x5eed);

    for cusps in &CUSP_SETS {
        for _ in 0..10_000 {
            let lon = rng.next_f64() * 360.0;
            let house = assigner.assign(lon, cusps).unwrap();
            assert!((1..=12).contains(&house));

            let containing = (0..HOUSE_COUNT)
                .filter(|&i| in_interval(lon, cusps[i], cusps[(i + 1) % HOUSE_COUNT]))
                .count();
            assert_eq!(containing, 1, "{lon} in {cusps:?}");
        }
    }
}

#[test]
fn test_cusps_open_their_own_house() {
    let assigner = HouseAssigner::new();
    for cusps in &CUSP_SETS {
        for (i, &cusp) in cusps.iter().enumerate() {
            assert_eq!(assigner.assign(cusp, cusps).unwrap() as usize, i + 1);
        }
    }
}

#[test]
fn test_house_system_codes() {
    for (code, system) in [
        ("P", HouseSystem::Placidus),
        ("k", HouseSystem::Koch),
        ("E", HouseSystem::Equal),
        ("W", HouseSystem::WholeSign),
        ("C", HouseSystem::Campanus),
        ("R", HouseSystem::Regiomontanus),
        ("Regiomontanus", HouseSystem::Regiomontanus),
    ] {
        assert_eq!(code.parse::<HouseSystem>().unwrap(), system);
    }
    assert!("Q".parse::<HouseSystem>().is_err());
    assert!("".parse::<HouseSystem>().is_err());
}
