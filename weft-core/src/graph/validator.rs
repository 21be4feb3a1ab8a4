//! Configuration Validator
//!
//! Runs once before the graph is built and rejects configurations that
//! cannot describe a meaningful reducer. Callers that trust their
//! configuration can skip it via `ReducerOptions::validate`.

use std::collections::HashSet;

use super::annotation::{Annotation, Direction};
use super::builder::{ArgumentSlots, FieldSpec};
use super::error::{GraphError, GraphResult, TargetKind};

/// Checks a field configuration against its argument slots.
pub struct Validator<'a> {
    fields: &'a [FieldSpec<'a>],
    duplicate_fields: &'a [String],
    argument_names: &'a [String],
    slots: &'a ArgumentSlots,
}

impl<'a> Validator<'a> {
    pub fn new(
        fields: &'a [FieldSpec<'a>],
        duplicate_fields: &'a [String],
        argument_names: &'a [String],
        slots: &'a ArgumentSlots,
    ) -> Self {
        Self {
            fields,
            duplicate_fields,
            argument_names,
            slots,
        }
    }

    /// Run every check, stopping at the first failure.
    pub fn check(&self) -> GraphResult<()> {
        self.check_shape()?;
        self.check_annotations()
    }

    fn check_shape(&self) -> GraphResult<()> {
        if let Some(name) = self.duplicate_fields.first() {
            return Err(GraphError::shape(format!("field '{name}' is declared twice")));
        }
        if self.fields.iter().any(|spec| spec.name.trim().is_empty()) {
            return Err(GraphError::shape("field names must not be blank"));
        }

        let mut seen = HashSet::with_capacity(self.argument_names.len());
        for name in self.argument_names {
            if name.trim().is_empty() {
                return Err(GraphError::shape("argument names must not be blank"));
            }
            if !seen.insert(name.as_str()) {
                return Err(GraphError::shape(format!(
                    "argument '{name}' is declared twice"
                )));
            }
        }
        Ok(())
    }

    fn check_annotations(&self) -> GraphResult<()> {
        let fields: HashSet<&str> = self.fields.iter().map(|spec| &**spec.name).collect();

        for spec in self.fields {
            for source in spec.annotations {
                for annotation in Annotation::parse(source)? {
                    let target = annotation.target();
                    let (known, kind) = match annotation.direction() {
                        Direction::Prev | Direction::Next => {
                            (fields.contains(target), TargetKind::Field)
                        }
                        Direction::Arg => {
                            (self.slots.resolve(target).is_some(), TargetKind::Argument)
                        }
                    };
                    if !known {
                        return Err(GraphError::unknown_target(&**spec.name, target, kind));
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Default)]
    struct Fixture {
        names: Vec<Arc<str>>,
        annotations: Vec<Vec<String>>,
    }

    impl Fixture {
        fn field(mut self, name: &str, annotations: &[&str]) -> Self {
            self.names.push(Arc::from(name));
            self.annotations
                .push(annotations.iter().map(|s| s.to_string()).collect());
            self
        }

        fn specs(&self) -> Vec<FieldSpec<'_>> {
            self.names
                .iter()
                .zip(&self.annotations)
                .map(|(name, annotations)| FieldSpec { name, annotations })
                .collect()
        }

        fn check(&self, argument_names: &[String]) -> GraphResult<()> {
            let specs = self.specs();
            let slots = ArgumentSlots::named(argument_names.iter().cloned());
            Validator::new(&specs, &[], argument_names, &slots).check()
        }
    }

    #[test]
    fn accepts_well_formed_configuration() {
        let fixture = Fixture::default()
            .field("id", &[])
            .field("history", &["@both id", "@prev history", "@arg 0"]);
        assert!(fixture.check(&[]).is_ok());
    }

    #[test]
    fn rejects_unknown_field_target() {
        let fixture = Fixture::default().field("history", &["@next id"]);
        assert_eq!(
            fixture.check(&[]),
            Err(GraphError::unknown_target("history", "id", TargetKind::Field))
        );
    }

    #[test]
    fn rejects_unknown_argument_slot() {
        let fixture = Fixture::default().field("total", &["@arg fee"]);
        let names = vec!["amount".to_string()];
        assert_eq!(
            fixture.check(&names),
            Err(GraphError::unknown_target("total", "fee", TargetKind::Argument))
        );
    }

    #[test]
    fn rejects_index_past_named_slots() {
        let fixture = Fixture::default().field("total", &["@arg 1"]);
        let names = vec!["amount".to_string()];
        assert!(matches!(
            fixture.check(&names),
            Err(GraphError::UnknownDependencyTarget { .. })
        ));
    }

    #[test]
    fn rejects_malformed_annotation() {
        let fixture = Fixture::default().field("a", &["@next"]);
        assert!(matches!(
            fixture.check(&[]),
            Err(GraphError::AnnotationSyntax { .. })
        ));
    }

    #[test]
    fn rejects_duplicate_and_blank_names() {
        let fixture = Fixture::default().field("a", &[]);
        let specs = fixture.specs();
        let slots = ArgumentSlots::positional();
        let duplicates = vec!["a".to_string()];
        assert!(matches!(
            Validator::new(&specs, &duplicates, &[], &slots).check(),
            Err(GraphError::ConfigurationShape { .. })
        ));

        let blank = Fixture::default().field(" ", &[]);
        assert!(matches!(
            blank.check(&[]),
            Err(GraphError::ConfigurationShape { .. })
        ));

        let names = vec!["rate".to_string(), "rate".to_string()];
        assert!(matches!(
            fixture.check(&names),
            Err(GraphError::ConfigurationShape { .. })
        ));
    }
}
