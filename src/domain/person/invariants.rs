use super::entity::PersonKind;
use crate::domain::constraint::check_bounded_text;
use crate::domain::{ConstraintViolation, Outcome, PersonId, PersonLookup};

/// Longest accepted person name, in characters
pub const MAX_NAME_LENGTH: usize = 120;

/// An absent id is valid (an optional reference); a present one must be a
/// positive integer.
pub fn check_person_id(id: Option<i64>) -> Outcome {
    match id {
        None => Ok(()),
        Some(id) if id >= 1 && id <= PersonId::MAX as i64 => Ok(()),
        Some(_) => Err(ConstraintViolation::Range(
            "The person ID must be a positive integer!".to_string(),
        )),
    }
}

/// The id is required and must not be taken in the `kind` registry.
pub fn check_person_id_as_primary_key(
    persons: &dyn PersonLookup,
    kind: PersonKind,
    id: Option<i64>,
) -> Outcome {
    check_person_id(id)?;
    let id = id.ok_or_else(|| {
        ConstraintViolation::MandatoryValueMissing(
            "A positive integer value for the person ID is required!".to_string(),
        )
    })?;
    if persons.has_person(kind, id as PersonId) {
        return Err(ConstraintViolation::Uniqueness(format!(
            "There is already a {} record with this person ID!",
            kind
        )));
    }
    Ok(())
}

/// A present id must refer to an existing entry of the `kind` registry.
pub fn check_person_id_as_reference(
    persons: &dyn PersonLookup,
    kind: PersonKind,
    id: Option<i64>,
) -> Outcome {
    check_person_id(id)?;
    if let Some(id) = id {
        if !persons.has_person(kind, id as PersonId) {
            return Err(ConstraintViolation::ReferentialIntegrity(format!(
                "There is no {} record with this person ID!",
                kind
            )));
        }
    }
    Ok(())
}

pub fn check_name(name: Option<&str>) -> Outcome {
    check_bounded_text(name, "person name", MAX_NAME_LENGTH)
}

/// The agent is optional; when given it must be an existing person.
pub fn check_agent(persons: &dyn PersonLookup, agent_id: Option<i64>) -> Outcome {
    check_person_id_as_reference(persons, PersonKind::Person, agent_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OutcomeExt;

    /// Person 1 exists as a director, person 15 as a plain person
    struct Fixture;

    impl PersonLookup for Fixture {
        fn has_person(&self, kind: PersonKind, id: PersonId) -> bool {
            match (kind, id) {
                (PersonKind::Person, 1) | (PersonKind::Person, 15) => true,
                (PersonKind::Director, 1) => true,
                _ => false,
            }
        }
    }

    #[test]
    fn test_person_id_range() {
        assert!(check_person_id(None).is_ok());
        assert!(check_person_id(Some(1)).is_ok());
        assert_eq!(check_person_id(Some(0)).kind(), crate::domain::ViolationKind::RangeViolation);
        assert!(check_person_id(Some(-5)).is_err());
    }

    #[test]
    fn test_primary_key_checks_registry_view() {
        assert!(matches!(
            check_person_id_as_primary_key(&Fixture, PersonKind::Person, None),
            Err(ConstraintViolation::MandatoryValueMissing(_))
        ));
        assert!(matches!(
            check_person_id_as_primary_key(&Fixture, PersonKind::Director, Some(1)),
            Err(ConstraintViolation::Uniqueness(_))
        ));
        // person 1 is not an actor yet
        assert!(check_person_id_as_primary_key(&Fixture, PersonKind::Actor, Some(1)).is_ok());
        assert!(check_person_id_as_primary_key(&Fixture, PersonKind::Person, Some(2)).is_ok());
    }

    #[test]
    fn test_reference_must_exist() {
        assert!(check_person_id_as_reference(&Fixture, PersonKind::Director, None).is_ok());
        assert!(check_person_id_as_reference(&Fixture, PersonKind::Director, Some(1)).is_ok());
        assert!(matches!(
            check_person_id_as_reference(&Fixture, PersonKind::Actor, Some(1)),
            Err(ConstraintViolation::ReferentialIntegrity(_))
        ));
    }

    #[test]
    fn test_agent_check() {
        assert!(check_agent(&Fixture, None).is_ok());
        assert!(check_agent(&Fixture, Some(15)).is_ok());
        assert!(check_agent(&Fixture, Some(99)).is_err());
    }

    #[test]
    fn test_name_rules() {
        assert!(check_name(Some("Stephen Frears")).is_ok());
        assert!(check_name(None).is_err());
        assert!(check_name(Some("  ")).is_err());
        assert_eq!(
            check_name(Some(&"n".repeat(121))).kind(),
            crate::domain::ViolationKind::StringLengthViolation
        );
    }
}
