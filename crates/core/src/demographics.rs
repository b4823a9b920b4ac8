//! Fake demographic text for synthetic patients.
//!
//! The patient factory delegates names, addresses and phone numbers to a
//! [`DemographicsSource`]. The default [`FakerDemographics`] uses the `fake` crate's US English
//! fakers driven by the caller's random source, so demographics are reproducible under a seed.

use er_types::{Gender, HumanName};
use fake::faker::address::en::{BuildingNumber, CityName, StateAbbr, StreetName, ZipCode};
use fake::faker::name::en::{FirstName, LastName};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::Rng;

/// Provider of plausible human-readable demographic fields.
pub trait DemographicsSource {
    /// A display name for a patient of `gender`.
    fn name<R: Rng + ?Sized>(&self, rng: &mut R, gender: Gender) -> HumanName;

    /// A postal address; may span several lines.
    fn address<R: Rng + ?Sized>(&self, rng: &mut R) -> String;

    fn phone<R: Rng + ?Sized>(&self, rng: &mut R) -> String;
}

/// Default provider backed by `fake`'s US English data.
#[derive(Clone, Copy, Debug, Default)]
pub struct FakerDemographics;

impl DemographicsSource for FakerDemographics {
    // Names are drawn independently of gender.
    fn name<R: Rng + ?Sized>(&self, rng: &mut R, _gender: Gender) -> HumanName {
        HumanName {
            given: FirstName().fake_with_rng(rng),
            family: LastName().fake_with_rng(rng),
        }
    }

    fn address<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let number: String = BuildingNumber().fake_with_rng(rng);
        let street: String = StreetName().fake_with_rng(rng);
        let city: String = CityName().fake_with_rng(rng);
        let state: String = StateAbbr().fake_with_rng(rng);
        let zip: String = ZipCode().fake_with_rng(rng);
        format!("{number} {street}\n{city}, {state} {zip}")
    }

    fn phone<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        PhoneNumber().fake_with_rng(rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn names_are_never_blank() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for gender in Gender::ALL.iter().cycle().take(60) {
            let name = FakerDemographics.name(&mut rng, *gender);
            assert!(!name.given.trim().is_empty());
            assert!(!name.family.trim().is_empty());
        }
    }

    #[test]
    fn address_has_street_and_city_lines() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let address = FakerDemographics.address(&mut rng);
        let lines: Vec<&str> = address.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[1].contains(", "));
    }

    #[test]
    fn phone_carries_a_full_number() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..50 {
            let phone = FakerDemographics.phone(&mut rng);
            let digits = phone.chars().filter(char::is_ascii_digit).count();
            assert!(digits >= 10, "phone {phone}");
        }
    }

    #[test]
    fn same_seed_gives_same_text() {
        let draw = |seed| {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            (
                FakerDemographics.name(&mut rng, Gender::Other),
                FakerDemographics.address(&mut rng),
                FakerDemographics.phone(&mut rng),
            )
        };
        assert_eq!(draw(9), draw(9));
        assert_ne!(draw(9), draw(10));
    }
}
