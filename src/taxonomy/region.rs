use serde::Serialize;

/// One of the 21 Swedish counties (län), the indivisible unit every partition is built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct BaseRegion {
    pub code: &'static str, // Two digits, leading zero kept ("01")
    pub name: &'static str, // Display name without the " län" suffix
}

impl BaseRegion {
    const fn new(code: &'static str, name: &'static str) -> Self {
        Self { code, name }
    }
}

static REGIONS: [BaseRegion; 21] = [
    BaseRegion::new("01", "Stockholm"),
    BaseRegion::new("03", "Uppsala"),
    BaseRegion::new("04", "Södermanland"),
    BaseRegion::new("05", "Östergötland"),
    BaseRegion::new("06", "Jönköping"),
    BaseRegion::new("07", "Kronoberg"),
    BaseRegion::new("08", "Kalmar"),
    BaseRegion::new("09", "Gotland"),
    BaseRegion::new("10", "Blekinge"),
    BaseRegion::new("12", "Skåne"),
    BaseRegion::new("13", "Halland"),
    BaseRegion::new("14", "Västra Götaland"),
    BaseRegion::new("17", "Värmland"),
    BaseRegion::new("18", "Örebro"),
    BaseRegion::new("19", "Västmanland"),
    BaseRegion::new("20", "Dalarna"),
    BaseRegion::new("21", "Gävleborg"),
    BaseRegion::new("22", "Västernorrland"),
    BaseRegion::new("23", "Jämtland"),
    BaseRegion::new("24", "Västerbotten"),
    BaseRegion::new("25", "Norrbotten"),
];

/// All counties in official code order.
#[inline] pub fn regions() -> &'static [BaseRegion] { &REGIONS }

/// Look up a county by its exact two-digit code.
pub fn by_code(code: &str) -> Option<&'static BaseRegion> {
    REGIONS.iter().find(|region| region.code == code)
}

/// Look up a county by its exact (diacritics-sensitive) name.
pub fn by_name(name: &str) -> Option<&'static BaseRegion> {
    REGIONS.iter().find(|region| region.name == name)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn codes_and_names_are_unique() {
        let codes = regions().iter().map(|r| r.code).collect::<HashSet<_>>();
        let names = regions().iter().map(|r| r.name).collect::<HashSet<_>>();
        assert_eq!(regions().len(), 21);
        assert_eq!(codes.len(), 21);
        assert_eq!(names.len(), 21);
    }

    #[test]
    fn codes_are_two_digits() {
        for region in regions() {
            assert_eq!(region.code.len(), 2, "{}", region.name);
            assert!(region.code.bytes().all(|b| b.is_ascii_digit()));
        }
    }

    #[test]
    fn lookups() {
        assert_eq!(by_code("09").map(|r| r.name), Some("Gotland"));
        assert_eq!(by_name("Skåne").map(|r| r.code), Some("12"));
        assert!(by_code("02").is_none());
        assert!(by_name("skåne").is_none());
    }
}
