//! Forward kinematics of a 5-joint robotic arm in the conformal model, chaining
//! many small computations whose results are fed back as inputs to the next
//! ones

use approx::assert_relative_eq;
use gasym::{
    algebras::cga::*,
    engine::{fields, Entity},
    symbolic::{Element, Rational},
    Engine, GradeSet, Multivector, Numeric,
};

type MV = Multivector<Cga>;

/// The point `(0, 0, 1)`. Has no run-time field at all
struct PointZ;

impl Entity<Cga> for PointZ {
    fn field_count(&self) -> usize {
        0
    }

    fn write_fields(&self, _out: &mut Vec<f64>) {}

    fn encode(&self, _slot: u32) -> MV {
        MV::e(E3) + e_o() + e_inf() * Rational::ONE_HALF
    }
}

/// A point of the `y = 0` plane
struct PointXz {
    x: f64,
    z: f64,
}

impl Entity<Cga> for PointXz {
    fn field_count(&self) -> usize {
        2
    }

    fn write_fields(&self, out: &mut Vec<f64>) {
        out.extend([self.x, self.z]);
    }

    fn encode(&self, slot: u32) -> MV {
        let [x, z] = fields::<Cga, 2>(slot);
        let half_norm_sq = (&x * &x + &z * &z) * Rational::ONE_HALF;
        x * MV::e(E1) + z * MV::e(E3) + e_o() + half_norm_sq * e_inf()
    }
}

/// Exponential, truncated to the fourth order
fn expp(arg: &Numeric<Cga>) -> Numeric<Cga> {
    Engine::<Cga, _>::new((arg,))
        .compute_cached(|(a,)| {
            let a2 = &a * &a;
            let a3 = &a2 * &a;
            let a4 = &a2 * &a2;
            (MV::one()
                + a
                + a2 * Rational::ONE_HALF
                + a3 * Rational::new(1, 6)
                + a4 * Rational::new(1, 24))
            .gselect(|_| GradeSet::from_mask(0b10111))
        })
        .reify::<f64>()
}

/// `r` divided by its norm
fn unit_rotor(r: &Numeric<Cga>) -> Numeric<Cga> {
    let norm_sq = Engine::<Cga, _>::new((r,))
        .compute(|(r,)| r.norm_sq())
        .reify::<f64>()
        .get(0);
    let mut unit = r.clone();
    for c in unit.coefficients_mut() {
        *c /= norm_sq.sqrt();
    }
    unit
}

/// The dual line through two points
fn line(p1: MV, p2: MV) -> MV {
    (p1 ^ p2 ^ e_inf()) >> MV::pseudoscalar_inverse()
}

struct Arm {
    r1: Numeric<Cga>,
    r2: Numeric<Cga>,
    r3: Numeric<Cga>,
    t2: Numeric<Cga>,
    r4: Numeric<Cga>,
    rg: Numeric<Cga>,
    jg_f: Numeric<Cga>,
}

fn arm(ang1: f64, ang2: f64, ang3: f64, ang4: f64, ang5: f64) -> Arm {
    let (d1, d2, d3, d4, d5) = (200.0, 680.0, 150.0, 140.0, 114.2);
    let (l12, l23) = (890.0, 880.0);

    let j1 = PointXz { x: d1, z: d2 };
    let j2 = PointXz { x: d1, z: d2 + l12 };
    let j3 = PointXz {
        x: d1 + l23,
        z: d2 + l12 + d3,
    };
    let jg = PointXz {
        x: d1 + l23 + d4 + d5,
        z: d2 + l12 + d3,
    };

    let lz = Engine::<Cga, _>::new((&PointZ, &ang1))
        .compute(|(pz, ang1)| ang1 * Rational::ONE_HALF * line(e_o(), pz))
        .reify::<f64>();
    let r1 = expp(&lz);

    let p2_help = Point::new(j1.x, 1.0, j1.z);
    let l2 = Engine::<Cga, _>::new((&r1, &j1, &p2_help, &ang2))
        .compute(|(r1, j1, p2_help, ang2)| {
            ang2 * Rational::ONE_HALF * r1.conjugate(&line(j1, p2_help))
        })
        .reify::<f64>();
    let r2 = expp(&l2);

    let p3_help = Point::new(j2.x, 1.0, j2.z);
    let r21 = Engine::<Cga, _>::new((&r1, &r2))
        .compute(|(r1, r2)| r2 * r1)
        .reify::<f64>();
    let (j2_f, l3) = Engine::<Cga, _>::new((&r21, &j2, &p3_help, &ang3))
        .compute(|(r21, j2, p3_help, ang3)| {
            let l3init = line(j2.clone(), p3_help);
            (
                r21.conjugate(&j2),
                ang3 * Rational::ONE_HALF * r21.conjugate(&l3init),
            )
        })
        .reify::<f64>();
    let r3 = expp(&l3);

    let (_j2_rot1, t2_help) = Engine::<Cga, _>::new((&r1, &j2, &j2_f))
        .compute(|(r1, j2, j2_f)| {
            let j2_rot1 = r1.conjugate(&j2);
            let t2 = j2_f.select(&[E1, E2, E3]) - j2_rot1.clone().select(&[E1, E2, E3]);
            (j2_rot1, (t2 * Rational::MINUS_ONE_HALF) ^ e_inf())
        })
        .reify::<f64>();
    let t2 = expp(&t2_help);

    let (mut l4init, l4weight, r3t2r1) = Engine::<Cga, _>::new((&j3, &jg, &r3, &t2, &r1))
        .compute(|(j3, jg, r3, t2, r1)| {
            let l4init = line(j3, jg);
            let l4weight = &l4init >> l4init.clone().rev();
            (l4init, l4weight, r3 * t2 * r1)
        })
        .reify::<f64>();
    let w = l4weight.get(0);
    let norm = if w < 0.0 { -(-w).sqrt() } else { w.sqrt() };
    for c in l4init.coefficients_mut() {
        *c /= norm;
    }

    let l4 = Engine::<Cga, _>::new((&l4init, &r3t2r1, &ang4))
        .compute(|(l4init, r3t2r1, ang4)| ang4 * Rational::ONE_HALF * r3t2r1.conjugate(&l4init))
        .reify::<f64>();
    let r4 = expp(&l4);

    let pg_help = Point::new(j3.x, 1.0, j3.z);
    let (lginit, r4r3t2r1) = Engine::<Cga, _>::new((&r4, &r3t2r1, &j3, &pg_help))
        .compute(|(r4, r3t2r1, j3, pg_help)| (line(j3, pg_help), r4 * r3t2r1))
        .reify::<f64>();
    let lg = Engine::<Cga, _>::new((&lginit, &r4r3t2r1, &ang5))
        .compute(|(lginit, r4r3t2r1, ang5)| {
            ang5 * Rational::ONE_HALF * r4r3t2r1.conjugate(&lginit)
        })
        .reify::<f64>();
    let rg = expp(&lg);

    // The end effector is carried by a unit elbow rotor. The truncated
    // exponential of L4 falls short of it by about 5e-4
    let r4_unit = unit_rotor(&r4);
    let rfinal = Engine::<Cga, _>::new((&rg, &r4_unit, &r3t2r1))
        .compute(|(rg, r4_unit, r3t2r1)| rg * r4_unit * r3t2r1)
        .reify::<f64>();
    let jg_f = Engine::<Cga, _>::new((&rfinal, &jg))
        .compute(|(rfinal, jg)| rfinal.conjugate(&jg))
        .reify::<f64>();

    Arm {
        r1,
        r2,
        r3,
        t2,
        r4,
        rg,
        jg_f,
    }
}

fn sanity_arm() -> Arm {
    arm(
        14f64.to_radians(),
        -25f64.to_radians(),
        32.6f64.to_radians(),
        66.9f64.to_radians(),
        -42f64.to_radians(),
    )
}

/// Compare with values printed with 6 significant digits. Elements that are
/// not listed must be zero, up to rounding errors
fn check(name: &str, mv: &Numeric<Cga>, expected: &[(Element, f64)]) {
    let scale = expected.iter().fold(1.0f64, |m, (_, c)| m.max(c.abs()));
    for (e, c) in mv.iter() {
        match expected.iter().find(|(e2, _)| *e2 == e) {
            Some((_, c2)) => assert_relative_eq!(c, *c2, max_relative = 1e-4, epsilon = 1e-6),
            None => assert!(
                c.abs() < 1e-9 * scale,
                "{name}: unexpected {c} on element {e:#b}"
            ),
        }
    }
    for (e, _) in expected {
        assert!(mv.elements().contains(e), "{name}: missing element {e:#b}");
    }
}

const E12: Element = E1 | E2;
const E13: Element = E1 | E3;
const E23: Element = E2 | E3;
const E1I: Element = E1 | NI;
const E2I: Element = E2 | NI;
const E3I: Element = E3 | NI;

#[test_log::test]
fn sanity() {
    let arm = sanity_arm();
    assert_eq!(arm.r1.to_string(), "0.992546 + 0.121869 e1^e2");
    check("R1", &arm.r1, &[(0, 0.992546), (E12, 0.121869)]);
    check(
        "R2",
        &arm.r2,
        &[
            (0, 0.976296),
            (E13, 0.210006),
            (E23, -0.0523604),
            (E1I, 142.804),
            (E2I, -35.6051),
            (E3I, -43.2871),
        ],
    );
    check(
        "R3",
        &arm.r3,
        &[
            (0, 0.959806),
            (E13, -0.272314),
            (E23, 0.0678954),
            (E1I, -404.827),
            (E2I, 100.935),
            (E3I, 161.69),
        ],
    );
    check(
        "T2",
        &arm.t2,
        &[(0, 1.0), (E1I, -182.475), (E2I, 45.4961), (E3I, 41.6926)],
    );
    check(
        "R4",
        &arm.r4,
        &[
            (0, 0.834423),
            (E12, 0.296658),
            (E13, 0.112228),
            (E23, 0.450123),
            (E1I, 145.475),
            (E2I, 583.469),
        ],
    );
    check(
        "Rg",
        &arm.rg,
        &[
            (0, 0.933654),
            (E12, 0.277405),
            (E13, 0.0937376),
            (E23, -0.206198),
            (E1I, 112.644),
            (E2I, -763.223),
            (E3I, -174.171),
        ],
    );
    check(
        "Jg_f",
        &arm.jg_f,
        &[
            (E1, 1351.52),
            (E2, -498.052),
            (E3, 2132.49),
            (NO, 0.99996),
            (NI, 3.31122e6),
        ],
    );
}

#[test]
fn unit_elbow_rotor() {
    let arm = sanity_arm();
    let r4 = unit_rotor(&arm.r4);
    let norm_sq = Engine::<Cga, _>::new((&r4,))
        .compute(|(r,)| r.norm_sq())
        .reify::<f64>();
    assert_relative_eq!(norm_sq.get(0), 1.0, max_relative = 1e-12);
    // Same rotation plane, only the scale changes
    assert_eq!(r4.elements(), arm.r4.elements());
    assert_relative_eq!(
        r4.get(E23) / r4.get(E12),
        arm.r4.get(E23) / arm.r4.get(E12),
        max_relative = 1e-12
    );
}

#[test]
fn exponentials_reuse_their_plans() {
    gasym::engine::clear_plan_cache();
    let first = sanity_arm();
    let cached = gasym::engine::cached_plan_count();
    assert!(cached > 0);
    // Same shapes, other values: no new plan
    let second = arm(0.1, 0.2, 0.3, 0.4, 0.5);
    assert_eq!(gasym::engine::cached_plan_count(), cached);
    assert_eq!(first.jg_f.elements(), second.jg_f.elements());
}
