use crate::core::fractals::mandelbrot::colour_mapping::kinds::ColourMapKind;
use crate::core::fractals::mandelbrot::colour_mapping::map::MandelbrotColourMap;
use crate::core::fractals::mandelbrot::colour_mapping::maps::fire_gradient::FireGradient;
use crate::core::fractals::mandelbrot::colour_mapping::maps::rainbow_bands::RainbowBands;

#[must_use]
pub fn colour_map_factory(kind: ColourMapKind, max_iterations: u32) -> Box<dyn MandelbrotColourMap> {
    match kind {
        ColourMapKind::RainbowBands => Box::new(RainbowBands::new(max_iterations)),
        ColourMapKind::FireGradient => Box::new(FireGradient::new(max_iterations)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::data::colour::Colour;

    #[test]
    fn all_array_has_default_first() {
        assert_eq!(ColourMapKind::ALL.first(), Some(&ColourMapKind::default()));
    }

    #[test]
    fn factory_round_trip_for_all_kinds() {
        for &kind in ColourMapKind::ALL {
            let map = colour_map_factory(kind, 256);
            assert_eq!(map.kind(), kind);
            assert_eq!(map.display_name(), kind.display_name());
        }
    }

    #[test]
    fn every_map_paints_the_set_black() {
        for &kind in ColourMapKind::ALL {
            let map = colour_map_factory(kind, 100);
            assert_eq!(map.map(100.0), Colour::BLACK, "{kind}");
        }
    }

    #[test]
    fn display_names_are_unique() {
        let names: Vec<&str> = ColourMapKind::ALL.iter().map(|k| k.display_name()).collect();

        for (i, name) in names.iter().enumerate() {
            for (j, other) in names.iter().enumerate() {
                if i != j {
                    assert_ne!(name, other, "Duplicate display name: {}", name);
                }
            }
        }
    }
}
