use log::debug;

use crate::error::ClassifyError;
use crate::ir::{Input, InputLocation};
use crate::parse::operation::Operation;
use crate::parse::parameter::ParameterOrRef;

use super::classifier::{InputClassifier, InputOrigin, RawInput};
use super::name_normalizer::sanitize;

/// An operation's inputs, keyed and split by where they travel on the wire.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartitionedInputs {
    pub path: Vec<Input>,
    pub query: Vec<Input>,
    pub body: Vec<Input>,
}

impl PartitionedInputs {
    /// All inputs, path first, then query, then body.
    pub fn iter(&self) -> impl Iterator<Item = &Input> {
        self.path.iter().chain(&self.query).chain(&self.body)
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty() && self.query.is_empty() && self.body.is_empty()
    }
}

/// Classify an operation's inputs and split them by location.
///
/// A shared path-level input is dropped when the operation declares an
/// input with the same wire name in the same location. Each surviving input
/// gets a sanitized key; declaration order is kept within each location.
pub fn partition<C>(
    operation: &Operation,
    shared: &[ParameterOrRef],
    classifier: &C,
) -> Result<PartitionedInputs, ClassifyError>
where
    C: InputClassifier + ?Sized,
{
    let classified = classifier.classify(operation, shared)?;

    let overrides: Vec<(&str, InputLocation)> = classified
        .iter()
        .filter(|raw| raw.origin == InputOrigin::Operation)
        .map(|raw| (raw.upstream_key.as_str(), raw.location))
        .collect();

    let keep = |raw: &RawInput| {
        let shadowed = raw.origin == InputOrigin::Shared
            && overrides.contains(&(raw.upstream_key.as_str(), raw.location));
        if shadowed {
            debug!(
                "operation overrides shared {:?} input `{}`",
                raw.location, raw.upstream_key
            );
        }
        !shadowed
    };

    let finish = |bucket: &[RawInput]| -> Vec<Input> {
        bucket
            .iter()
            .filter(|&raw| keep(raw))
            .map(|raw| Input {
                key: sanitize(&raw.upstream_key),
                upstream_key: raw.upstream_key.clone(),
                location: raw.location,
                field: raw.field.clone(),
            })
            .collect()
    };

    Ok(PartitionedInputs {
        path: finish(&classified.path),
        query: finish(&classified.query),
        body: finish(&classified.body),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::classifier::ClassifiedInputs;
    use crate::ir::{InputField, InputType};

    /// Returns a fixed classification regardless of the operation.
    struct Fixed(ClassifiedInputs);

    impl InputClassifier for Fixed {
        fn classify(
            &self,
            _operation: &Operation,
            _shared: &[ParameterOrRef],
        ) -> Result<ClassifiedInputs, ClassifyError> {
            Ok(self.0.clone())
        }
    }

    struct Failing;

    impl InputClassifier for Failing {
        fn classify(
            &self,
            _operation: &Operation,
            _shared: &[ParameterOrRef],
        ) -> Result<ClassifiedInputs, ClassifyError> {
            Err(ClassifyError::UnclassifiableParameter {
                name: "filter".to_string(),
                reason: "deepObject style".to_string(),
            })
        }
    }

    fn raw(upstream: &str, location: InputLocation, origin: InputOrigin, label: &str) -> RawInput {
        RawInput {
            upstream_key: upstream.to_string(),
            location,
            origin,
            field: InputField::new(label, InputType::String),
        }
    }

    #[test]
    fn test_sanitizes_keys_and_keeps_order() {
        let classifier = Fixed(ClassifiedInputs {
            path: vec![raw("pet-id", InputLocation::Path, InputOrigin::Shared, "Pet Id")],
            query: vec![
                raw("user_id", InputLocation::Query, InputOrigin::Operation, "User Id"),
                raw("limit", InputLocation::Query, InputOrigin::Operation, "Limit"),
            ],
            body: vec![],
        });
        let inputs = partition(&Operation::default(), &[], &classifier).unwrap();

        assert_eq!(inputs.path[0].key, "petId");
        assert_eq!(inputs.path[0].upstream_key, "pet-id");
        let query: Vec<_> = inputs.query.iter().map(|i| i.key.as_str()).collect();
        assert_eq!(query, ["userId", "limit"]);
        assert!(inputs.body.is_empty());
        assert!(!inputs.is_empty());
    }

    #[test]
    fn test_operation_input_shadows_shared_input_in_same_location() {
        let classifier = Fixed(ClassifiedInputs {
            path: vec![],
            query: vec![
                raw("limit", InputLocation::Query, InputOrigin::Shared, "Shared"),
                raw("limit", InputLocation::Query, InputOrigin::Operation, "Own"),
            ],
            body: vec![raw("limit", InputLocation::Body, InputOrigin::Operation, "Body")],
        });
        let inputs = partition(&Operation::default(), &[], &classifier).unwrap();

        assert_eq!(inputs.query.len(), 1);
        assert_eq!(inputs.query[0].field.label, "Own");
        assert_eq!(inputs.body.len(), 1);
    }

    #[test]
    fn test_shared_input_survives_when_only_other_location_matches() {
        let classifier = Fixed(ClassifiedInputs {
            path: vec![raw("id", InputLocation::Path, InputOrigin::Shared, "Id")],
            query: vec![raw("id", InputLocation::Query, InputOrigin::Operation, "Id")],
            body: vec![],
        });
        let inputs = partition(&Operation::default(), &[], &classifier).unwrap();
        assert_eq!(inputs.path.len(), 1);
        assert_eq!(inputs.query.len(), 1);
        let order: Vec<_> = inputs.iter().map(|i| i.location).collect();
        assert_eq!(order, [InputLocation::Path, InputLocation::Query]);
    }

    #[test]
    fn test_classifier_error_propagates() {
        let err = partition(&Operation::default(), &[], &Failing).unwrap_err();
        assert!(err.to_string().contains("filter"));
    }

    #[test]
    fn test_empty_operation_has_no_inputs() {
        let inputs = partition(
            &Operation::default(),
            &[],
            &Fixed(ClassifiedInputs::default()),
        )
        .unwrap();
        assert!(inputs.is_empty());
    }
}
