use check_core::material::SteelMaterial;
use check_core::provisions::compression::{critical_stress, elastic_buckling_stress};
use check_core::provisions::{compression, flexure_major, flexure_minor, flexure_round_hss};
use check_core::provisions::{
    CompressionInput, MajorAxisInput, MajorAxisSection, MinorAxisInput, MinorAxisSection, RoundHssInput,
};
use check_core::SectionKind;
use proptest::prelude::*;

fn wide_flange(ho: f64, j: f64, sx: f64, shape_factor: f64, ry: f64, rts: f64) -> MajorAxisSection {
    MajorAxisSection {
        kinds: SectionKind::WideFlange.into(),
        ho: ho.into(),
        j: j.into(),
        sx: sx.into(),
        zx: (sx * shape_factor).into(),
        ry: ry.into(),
        rts: rts.into(),
        iy: None,
        cw: None,
    }
}

proptest! {
    #[test]
    fn major_axis_strength_never_increases_with_lb(
        ho in 5.0f64..40.0,
        j in 0.05f64..20.0,
        sx in 5.0f64..1000.0,
        shape_factor in 1.05f64..1.25,
        ry in 0.5f64..4.0,
        rts_over_ry in 1.05f64..1.35,
        fy in 36.0f64..70.0,
        lb in 1.0f64..900.0,
        step in 0.0f64..300.0,
    ) {
        let section = wide_flange(ho, j, sx, shape_factor, ry, ry * rts_over_ry);
        let input = MajorAxisInput::new(section, vec![lb, lb + step], SteelMaterial::new(fy));
        let phi_mn = flexure_major::calculate(&input).unwrap();
        prop_assert!(
            phi_mn[1] <= phi_mn[0] * (1.0 + 1e-12),
            "φMn rose from {} at Lb = {} to {} at Lb = {}",
            phi_mn[0], lb, phi_mn[1], lb + step
        );
    }

    #[test]
    fn major_axis_strength_bounded_by_mp(
        sx in 5.0f64..1000.0,
        shape_factor in 1.05f64..1.25,
        cb in 1.0f64..3.0,
        lb in 1.0f64..900.0,
    ) {
        let section = wide_flange(17.4, 1.24, sx, shape_factor, 1.65, 1.98);
        let input = MajorAxisInput::new(section, lb, SteelMaterial::default()).with_cb(cb);
        let phi_mn = flexure_major::calculate(&input).unwrap()[0];
        prop_assert!(phi_mn > 0.0);
        prop_assert!(phi_mn <= 0.9 * 50.0 * sx * shape_factor * (1.0 + 1e-12));
    }

    #[test]
    fn critical_stress_never_exceeds_fy(
        fy in 30.0f64..100.0,
        e in 20000.0f64..30000.0,
        lb in 1.0f64..1200.0,
        r in 0.2f64..8.0,
    ) {
        let fe = elastic_buckling_stress(e, lb, r);
        let fcr = critical_stress(fy, fe);
        prop_assert!(fcr > 0.0);
        prop_assert!(fcr <= fy);
    }

    #[test]
    fn minor_axis_strength_bounded_by_mp(
        sy in 1.0f64..200.0,
        shape_factor in 1.0f64..1.6,
        lambda_f in 1.0f64..40.0,
        fy in 36.0f64..70.0,
    ) {
        let zy = sy * shape_factor;
        let input = MinorAxisInput {
            section: MinorAxisSection { sy: sy.into(), zy: zy.into(), lambda_f: lambda_f.into() },
            material: SteelMaterial::new(fy),
        };
        let phi_mn = flexure_minor::calculate(&input).unwrap()[0];
        let mp = (fy * zy).min(1.6 * fy * sy);
        prop_assert!(phi_mn > 0.0);
        prop_assert!(phi_mn <= 0.9 * mp * (1.0 + 1e-12));
    }

    #[test]
    fn round_hss_strength_bounded_by_mp(
        d in 2.0f64..30.0,
        d_over_t in 5.0f64..255.0,
    ) {
        let t = d / d_over_t;
        let di = d - 2.0 * t;
        let s = std::f64::consts::PI * (d.powi(4) - di.powi(4)) / (32.0 * d);
        let z = (d.powi(3) - di.powi(3)) / 6.0;
        let input = RoundHssInput {
            d: d.into(),
            t: t.into(),
            s: s.into(),
            z: z.into(),
            material: SteelMaterial::default(),
        };
        let phi_mn = flexure_round_hss::calculate(&input).unwrap()[0];
        prop_assert!(phi_mn > 0.0);
        prop_assert!(phi_mn <= 0.9 * 50.0 * z * (1.0 + 1e-12));
    }

    #[test]
    fn batch_order_does_not_change_results(
        lengths in prop::collection::vec(12.0f64..600.0, 1..32),
    ) {
        let forward = CompressionInput {
            area: 14.7.into(),
            rx: 7.38.into(),
            ry: 1.65.into(),
            lb: lengths.clone().into(),
            material: SteelMaterial::default(),
        };
        let mut reversed_lengths = lengths.clone();
        reversed_lengths.reverse();
        let reversed = CompressionInput { lb: reversed_lengths.into(), ..forward.clone() };

        let mut expected = compression::calculate(&forward).unwrap();
        expected.reverse();
        prop_assert_eq!(compression::calculate(&reversed).unwrap(), expected);

        let section = wide_flange(17.4, 1.24, 88.9, 1.136, 1.65, 1.98);
        let major = MajorAxisInput::new(section.clone(), lengths.clone(), SteelMaterial::default());
        let singles: Vec<f64> = lengths
            .iter()
            .map(|&lb| {
                flexure_major::calculate(&MajorAxisInput::new(section.clone(), lb, SteelMaterial::default()))
                    .unwrap()[0]
            })
            .collect();
        prop_assert_eq!(flexure_major::calculate(&major).unwrap(), singles);
    }
}
