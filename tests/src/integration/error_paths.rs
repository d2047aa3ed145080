//! # Error Paths
//!
//! Each failure kind is reported with the identifiers involved, and no
//! partial sequence is ever produced.

#[cfg(test)]
mod tests {
    use crate::fixtures::{call, complex, id, r, try_complex};
    use il_core::{
        ActionTemplate, ComplexCommand, ConversionApi, ConversionError, Converter,
        ConverterConfig, Identifier, ValueSource, VectorSimpleCommand,
    };

    // =============================================================================
    // BUILDER ERRORS
    // =============================================================================

    #[test]
    fn test_duplicate_declaration_fails_on_add() {
        let mut program = VectorSimpleCommand::new();
        program.add(call("X1", "A1", vec![])).unwrap();

        let err = program.add(call("X1", "A2", vec![])).unwrap_err();

        assert_eq!(
            err,
            ConversionError::DuplicateDeclaration {
                identifier: id("X1")
            }
        );
        assert_eq!(program.len(), 1);
    }

    #[test]
    fn test_builder_usable_after_duplicate() {
        let mut program = VectorSimpleCommand::new();
        program.add(call("X1", "A1", vec![])).unwrap();
        assert!(program.add(call("X1", "A1", vec![])).is_err());

        program.add(call("X2", "A2", vec![r("X1")])).unwrap();

        assert_eq!(program.len(), 2);
        assert!(Converter::new()
            .convert(&ComplexCommand::new(program).unwrap())
            .is_ok());
    }

    #[test]
    fn test_empty_command_rejected() {
        let err = ComplexCommand::new(VectorSimpleCommand::new()).unwrap_err();

        assert!(matches!(err, ConversionError::EmptyOrInvalidCommand { .. }));
    }

    #[test]
    fn test_invalid_names_rejected() {
        assert!(matches!(
            Identifier::new(""),
            Err(ConversionError::EmptyOrInvalidCommand { .. })
        ));
        assert!(matches!(
            Identifier::new("   "),
            Err(ConversionError::EmptyOrInvalidCommand { .. })
        ));
        assert!(matches!(
            ActionTemplate::new(""),
            Err(ConversionError::EmptyOrInvalidCommand { .. })
        ));
    }

    #[test]
    fn test_input_cannot_name_an_action_result() {
        assert!(matches!(
            Identifier::new("input"),
            Err(ConversionError::EmptyOrInvalidCommand { .. })
        ));
        assert!(matches!(
            Identifier::new("42"),
            Err(ConversionError::EmptyOrInvalidCommand { .. })
        ));
    }

    #[test]
    fn test_duplicate_object_key_rejected() {
        let result = ValueSource::object([("k", r("X1")), ("k", ValueSource::input())]);

        assert!(matches!(
            result,
            Err(ConversionError::EmptyOrInvalidCommand { .. })
        ));
    }

    #[test]
    fn test_second_return_rejected() {
        let mut program = VectorSimpleCommand::new();
        program.add(call("X1", "A1", vec![])).unwrap();
        program.returning(&id("X1")).unwrap();

        assert!(program.returning(ValueSource::input()).is_err());
    }

    // =============================================================================
    // CONVERSION ERRORS
    // =============================================================================

    #[test]
    fn test_unresolved_reference_reports_identifier_and_dependent() {
        let command = complex(vec![
            call("X1", "A1", vec![ValueSource::input()]),
            call("X2", "A2", vec![r("X1"), r("Missing")]),
        ]);

        let err = Converter::new().convert(&command).unwrap_err();

        assert_eq!(
            err,
            ConversionError::UnresolvedReference {
                identifier: id("Missing"),
                dependent: Some(id("X2")),
            }
        );
        assert!(err.to_string().contains("Missing"));
        assert!(err.to_string().contains("X2"));
    }

    #[test]
    fn test_unresolved_return_reported() {
        let mut program = VectorSimpleCommand::new();
        program.add(call("X1", "A1", vec![])).unwrap();
        program.returning(&id("Nowhere")).unwrap();

        let err = Converter::new()
            .convert(&ComplexCommand::new(program).unwrap())
            .unwrap_err();

        assert_eq!(
            err,
            ConversionError::UnresolvedReference {
                identifier: id("Nowhere"),
                dependent: None,
            }
        );
    }

    #[test]
    fn test_cycle_reports_participant() {
        let command = complex(vec![
            call("Start", "Init", vec![ValueSource::input()]),
            call("P", "Loop", vec![r("Start"), r("R")]),
            call("Q", "Loop", vec![r("P")]),
            call("R", "Loop", vec![r("Q")]),
        ]);

        let err = Converter::new().convert(&command).unwrap_err();

        match err {
            ConversionError::DependencyCycle { identifier, cycle } => {
                assert_eq!(identifier, id("P"));
                assert_eq!(cycle, vec![id("P"), id("Q"), id("R")]);
            }
            other => panic!("expected cycle, got {:?}", other),
        }
    }

    #[test]
    fn test_cycle_message_lists_path() {
        let command = complex(vec![call("X", "A", vec![r("Y")]), call("Y", "B", vec![r("X")])]);

        let err = Converter::new().convert(&command).unwrap_err();

        assert_eq!(err.to_string(), "Dependency cycle through X: X -> Y -> X");
    }

    #[test]
    fn test_self_reference_is_cycle() {
        let command = complex(vec![call("X", "A", vec![r("X")])]);

        let err = Converter::new().convert(&command).unwrap_err();

        assert!(matches!(
            err,
            ConversionError::DependencyCycle { ref identifier, .. } if *identifier == id("X")
        ));
    }

    #[test]
    fn test_schedule_rejects_graph_of_another_command() {
        let converter = Converter::new();
        let three = complex(vec![
            call("X1", "A1", vec![]),
            call("X2", "A2", vec![r("X1")]),
            call("X3", "A3", vec![r("X2")]),
        ]);
        let one = complex(vec![call("X1", "A1", vec![])]);
        let graph = converter.build_dependency_graph(&three).unwrap();

        let err = converter.schedule(&one, &graph).unwrap_err();

        assert!(matches!(err, ConversionError::EmptyOrInvalidCommand { .. }));
        assert_eq!(converter.schedule(&three, &graph).unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_limits_applied_before_ordering() {
        let converter = Converter::with_config(ConverterConfig {
            max_actions: 2,
            ..ConverterConfig::default()
        });
        let command = try_complex(vec![
            call("X1", "A1", vec![]),
            call("X2", "A2", vec![]),
            call("X3", "A3", vec![]),
        ])
        .unwrap();

        assert_eq!(
            converter.convert(&command).unwrap_err(),
            ConversionError::TooManyActions { count: 3, max: 2 }
        );
    }
}
