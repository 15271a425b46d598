//! Standard material tables
//!
//! Tables are stored in identifier order so that `ID as usize` indexes the
//! matching record; the tests below hold that invariant.

use super::{
    ColorShift, FilterId, FilterMaterial, LensId, LensMaterial, MirrorId, MirrorMaterial,
};

/// Mirror coatings
pub static MIRRORS: [MirrorMaterial; 6] = [
    MirrorMaterial {
        id: MirrorId::Aluminum,
        name: "Aluminum",
        description: "Aluminum gives good reflectivity across the visible band (85%) \
                      but performs poorly in the ultraviolet and infrared.",
        reflectivity: 0.85,
        uv_transmission: 0.3,
        ir_transmission: 0.7,
        quality: 0.7,
        brightness: 0.85,
        color_shift: ColorShift::NEUTRAL,
    },
    MirrorMaterial {
        id: MirrorId::Silver,
        name: "Silver",
        description: "Silver has the highest reflectivity (95%) and gives a very bright \
                      image, but tarnishes without a protective overcoat.",
        reflectivity: 0.95,
        uv_transmission: 0.6,
        ir_transmission: 0.95,
        quality: 0.9,
        brightness: 1.2,
        color_shift: ColorShift::NEUTRAL,
    },
    MirrorMaterial {
        id: MirrorId::Glass,
        name: "Polished glass",
        description: "Produces a stable image with 70% reflectivity, but reflects \
                      noticeably less light so the star looks subdued.",
        reflectivity: 0.70,
        uv_transmission: 0.8,
        ir_transmission: 0.8,
        quality: 0.8,
        brightness: 0.7,
        color_shift: ColorShift::NEUTRAL,
    },
    MirrorMaterial {
        id: MirrorId::Gold,
        name: "Gold",
        description: "Reflects infrared very well but is weaker in the visible band. \
                      Gives the star a warm golden tint.",
        reflectivity: 0.85,
        uv_transmission: 0.1,
        ir_transmission: 0.98,
        quality: 0.6,
        brightness: 0.8,
        color_shift: ColorShift::new(1.3, 1.1, 0.7),
    },
    MirrorMaterial {
        id: MirrorId::Dielectric,
        name: "Dielectric coating",
        description: "Optimized multi-layer coating with 99% reflectivity for maximum \
                      efficiency. Delivers high contrast.",
        reflectivity: 0.99,
        uv_transmission: 0.95,
        ir_transmission: 0.95,
        quality: 0.95,
        brightness: 1.4,
        color_shift: ColorShift::NEUTRAL,
    },
    MirrorMaterial {
        id: MirrorId::Rough,
        name: "Rough mirror",
        description: "Surface micro-defects scatter light strongly. Reflectivity is \
                      around 60% and the image is blurred and soapy.",
        reflectivity: 0.60,
        uv_transmission: 0.4,
        ir_transmission: 0.5,
        quality: 0.2,
        brightness: 0.6,
        color_shift: ColorShift::new(0.9, 0.9, 0.9),
    },
];

/// Lens materials
pub static LENSES: [LensMaterial; 6] = [
    LensMaterial {
        id: LensId::Plastic,
        name: "Plastic",
        description: "Cheap material with high chromatic aberration (80%); badly \
                      distorts the image and adds rainbow fringes.",
        transmission: 0.85,
        aberration: 0.8,
        quality: 0.4,
        fov_degrees: 2.5,
        focus: "Defocused",
        color_shift: ColorShift::NEUTRAL,
    },
    LensMaterial {
        id: LensId::Glass,
        name: "Soda-lime glass",
        description: "Standard glass with moderate distortion (40% aberration); \
                      slightly blurs the image.",
        transmission: 0.92,
        aberration: 0.4,
        quality: 0.7,
        fov_degrees: 2.0,
        focus: "Good",
        color_shift: ColorShift::NEUTRAL,
    },
    LensMaterial {
        id: LensId::Fluorite,
        name: "Fluorite",
        description: "High-grade material with minimal aberration (10%), ideal for \
                      astronomy. Gives a very crisp image.",
        transmission: 0.98,
        aberration: 0.1,
        quality: 0.95,
        fov_degrees: 1.8,
        focus: "Ideal",
        color_shift: ColorShift::NEUTRAL,
    },
    LensMaterial {
        id: LensId::Quartz,
        name: "Quartz",
        description: "Passes ultraviolet well (95%) and resists distortion (20% \
                      aberration). Bright in the UV band.",
        transmission: 0.95,
        aberration: 0.2,
        quality: 0.85,
        fov_degrees: 1.9,
        focus: "Excellent",
        color_shift: ColorShift::new(0.95, 0.98, 1.1),
    },
    LensMaterial {
        id: LensId::Astro,
        name: "Astrophysical glass",
        description: "Glass designed for telescopes with minimal distortion (5%). \
                      Produces a perfectly sharp image.",
        transmission: 0.99,
        aberration: 0.05,
        quality: 0.98,
        fov_degrees: 1.7,
        focus: "Perfectly sharp",
        color_shift: ColorShift::NEUTRAL,
    },
    LensMaterial {
        id: LensId::Fisheye,
        name: "Radial glass",
        description: "Creates a fisheye effect that bends the edges of the field. \
                      Useful for demonstrating optical distortion.",
        transmission: 0.88,
        aberration: 0.6,
        quality: 0.5,
        fov_degrees: 3.5,
        focus: "Distorted",
        color_shift: ColorShift::NEUTRAL,
    },
];

/// Filters
pub static FILTERS: [FilterMaterial; 7] = [
    FilterMaterial {
        id: FilterId::Clear,
        name: "Clear",
        description: "Passes the full spectrum. A neutral filter that leaves the \
                      image unchanged.",
        uv_transmission: 1.0,
        visible_transmission: 1.0,
        ir_transmission: 1.0,
        quality: 1.0,
        color_shift: ColorShift::NEUTRAL,
    },
    FilterMaterial {
        id: FilterId::Uv,
        name: "UV filter",
        description: "Blocks up to 90% of ultraviolet, improving contrast and \
                      cutting UV brightness.",
        uv_transmission: 0.1,
        visible_transmission: 0.95,
        ir_transmission: 1.0,
        quality: 0.9,
        color_shift: ColorShift::new(0.9, 0.95, 0.85),
    },
    FilterMaterial {
        id: FilterId::Ir,
        name: "IR filter",
        description: "Suppresses the warm tones of the image and dims the visible \
                      band, leaving a cool cast.",
        uv_transmission: 0.1,
        visible_transmission: 0.2,
        ir_transmission: 0.9,
        quality: 0.7,
        color_shift: ColorShift::new(0.3, 0.4, 1.0),
    },
    FilterMaterial {
        id: FilterId::Blue,
        name: "Blue filter",
        description: "Passes only short-wavelength light (450 nm), so everything \
                      looks blue. Emphasizes hot stars.",
        uv_transmission: 0.8,
        visible_transmission: 0.3,
        ir_transmission: 0.1,
        quality: 0.8,
        color_shift: ColorShift::new(0.2, 0.4, 1.5),
    },
    FilterMaterial {
        id: FilterId::Red,
        name: "Red filter",
        description: "Passes only long-wavelength light (650 nm) and gives a warm \
                      red image. Cool objects go dark.",
        uv_transmission: 0.1,
        visible_transmission: 0.4,
        ir_transmission: 0.9,
        quality: 0.8,
        color_shift: ColorShift::new(1.8, 0.3, 0.2),
    },
    FilterMaterial {
        id: FilterId::Nd,
        name: "Neutral density (ND)",
        description: "Evenly reduces brightness in every band without changing \
                      color.",
        uv_transmission: 0.5,
        visible_transmission: 0.5,
        ir_transmission: 0.5,
        quality: 0.9,
        color_shift: ColorShift::new(0.8, 0.8, 0.8),
    },
    FilterMaterial {
        id: FilterId::Polarizing,
        name: "Polarizing",
        description: "Improves contrast and blocks glare from reflective surfaces, \
                      sharpening fine detail.",
        uv_transmission: 0.7,
        visible_transmission: 0.6,
        ir_transmission: 0.7,
        quality: 0.85,
        color_shift: ColorShift::new(0.9, 0.9, 0.9),
    },
];

/// Mirror record for an identifier
pub fn mirror(id: MirrorId) -> &'static MirrorMaterial {
    &MIRRORS[id as usize]
}

/// Lens record for an identifier
pub fn lens(id: LensId) -> &'static LensMaterial {
    &LENSES[id as usize]
}

/// Filter record for an identifier
pub fn filter(id: FilterId) -> &'static FilterMaterial {
    &FILTERS[id as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn in_unit_range(value: f64) -> bool {
        (0.0..=1.0).contains(&value)
    }

    fn positive_shift(shift: &ColorShift) -> bool {
        shift.r > 0.0 && shift.g > 0.0 && shift.b > 0.0
    }

    #[test]
    fn test_tables_are_in_id_order() {
        for (i, id) in MirrorId::ALL.iter().enumerate() {
            assert_eq!(MIRRORS[i].id, *id);
            assert_eq!(mirror(*id).id, *id);
        }
        for (i, id) in LensId::ALL.iter().enumerate() {
            assert_eq!(LENSES[i].id, *id);
            assert_eq!(lens(*id).id, *id);
        }
        for (i, id) in FilterId::ALL.iter().enumerate() {
            assert_eq!(FILTERS[i].id, *id);
            assert_eq!(filter(*id).id, *id);
        }
    }

    #[test]
    fn test_mirror_fields_in_range() {
        for m in MIRRORS.iter() {
            assert!(in_unit_range(m.reflectivity), "{}", m.id);
            assert!(in_unit_range(m.uv_transmission), "{}", m.id);
            assert!(in_unit_range(m.ir_transmission), "{}", m.id);
            assert!(in_unit_range(m.quality), "{}", m.id);
            assert!(m.brightness > 0.0);
            assert!(positive_shift(&m.color_shift));
        }
    }

    #[test]
    fn test_lens_fields_in_range() {
        for l in LENSES.iter() {
            assert!(in_unit_range(l.transmission), "{}", l.id);
            assert!(in_unit_range(l.aberration), "{}", l.id);
            assert!(in_unit_range(l.quality), "{}", l.id);
            assert!(l.fov_degrees > 0.0);
            assert!(!l.focus.is_empty());
            assert!(positive_shift(&l.color_shift));
        }
    }

    #[test]
    fn test_filter_fields_in_range() {
        for f in FILTERS.iter() {
            assert!(in_unit_range(f.uv_transmission), "{}", f.id);
            assert!(in_unit_range(f.visible_transmission), "{}", f.id);
            assert!(in_unit_range(f.ir_transmission), "{}", f.id);
            assert!(in_unit_range(f.quality), "{}", f.id);
            assert!(positive_shift(&f.color_shift));
        }
    }

    #[test]
    fn test_known_values() {
        let silver = mirror(MirrorId::Silver);
        assert_eq!(silver.reflectivity, 0.95);
        assert_eq!(silver.brightness, 1.2);

        let fluorite = lens(LensId::Fluorite);
        assert_eq!(fluorite.transmission, 0.98);
        assert_eq!(fluorite.quality, 0.95);

        assert_eq!(mirror(MirrorId::Gold).color_shift.r, 1.3);
        assert_eq!(filter(FilterId::Clear).visible_transmission, 1.0);
    }
}
