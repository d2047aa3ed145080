//! # Conversion Properties
//!
//! Randomized programs checked against the ordering guarantees:
//! - every dependency precedes its dependents
//! - the output is a permutation of the input
//! - conversion is deterministic
//! - an already-valid order is returned unchanged
//! - any cycle is rejected

#[cfg(test)]
mod tests {
    use crate::fixtures::{dag_program, node, ring_program};
    use il_core::{ConversionApi, ConversionError, Converter, Sequence};
    use proptest::prelude::*;
    use proptest::sample::Index;
    use std::collections::HashSet;

    /// Logical dependency lists: node `k` reads some nodes `< k`.
    fn deps_strategy(max_nodes: usize) -> impl Strategy<Value = Vec<Vec<usize>>> {
        prop::collection::vec(prop::collection::vec(any::<Index>(), 0..4), 1..max_nodes).prop_map(
            |picks| {
                picks
                    .into_iter()
                    .enumerate()
                    .map(|(k, idxs)| {
                        if k == 0 {
                            return Vec::new();
                        }
                        let mut deps: Vec<usize> = idxs.iter().map(|i| i.index(k)).collect();
                        deps.sort_unstable();
                        deps.dedup();
                        deps
                    })
                    .collect()
            },
        )
    }

    /// A DAG plus a shuffled insertion order.
    fn shuffled_dag() -> impl Strategy<Value = (Vec<Vec<usize>>, Vec<usize>)> {
        deps_strategy(40).prop_flat_map(|deps| {
            let n = deps.len();
            (Just(deps), Just((0..n).collect::<Vec<_>>()).prop_shuffle())
        })
    }

    fn assert_dependencies_first(sequence: &Sequence) -> Result<(), TestCaseError> {
        let mut seen = HashSet::new();
        for action in sequence.actions() {
            for dep in action.references() {
                prop_assert!(seen.contains(dep), "{} used before declared", dep);
            }
            seen.insert(action.result().clone());
        }
        Ok(())
    }

    proptest! {
        /// Dependencies always come before the actions reading them
        #[test]
        fn dependencies_precede_dependents((deps, order) in shuffled_dag()) {
            let command = dag_program(&deps, &order);
            let sequence = Converter::new().convert(&command).unwrap();
            assert_dependencies_first(&sequence)?;
        }

        /// Output holds exactly the input actions
        #[test]
        fn output_is_permutation_of_input((deps, order) in shuffled_dag()) {
            let command = dag_program(&deps, &order);
            let sequence = Converter::new().convert(&command).unwrap();

            prop_assert_eq!(sequence.len(), command.len());
            let mut input: Vec<_> = command.actions().cloned().collect();
            let mut output = sequence.actions().to_vec();
            input.sort_by(|a, b| a.result().cmp(b.result()));
            output.sort_by(|a, b| a.result().cmp(b.result()));
            prop_assert_eq!(input, output);
        }

        /// Same command, same sequence, same rendering
        #[test]
        fn conversion_is_deterministic((deps, order) in shuffled_dag()) {
            let command = dag_program(&deps, &order);
            let converter = Converter::new();
            let first = converter.convert(&command).unwrap();
            let second = converter.convert(&command).unwrap();
            prop_assert_eq!(first.render(), second.render());
            prop_assert_eq!(first, second);
        }

        /// Declaring in a valid order means nothing moves
        #[test]
        fn valid_order_is_unchanged(deps in deps_strategy(40)) {
            let order: Vec<usize> = (0..deps.len()).collect();
            let command = dag_program(&deps, &order);
            let sequence = Converter::new().convert(&command).unwrap();

            let expected: Vec<_> = command.actions().cloned().collect();
            prop_assert_eq!(sequence.actions().to_vec(), expected);
        }

        /// A ring of any size, declared in any order, is a cycle
        #[test]
        fn rings_are_rejected(order in (1usize..20).prop_flat_map(|n| Just((0..n).collect::<Vec<_>>()).prop_shuffle())) {
            let n = order.len();
            let command = ring_program(&order);

            match Converter::new().convert(&command) {
                Err(ConversionError::DependencyCycle { identifier, cycle }) => {
                    prop_assert_eq!(cycle.len(), n);
                    prop_assert!(cycle.contains(&identifier));
                    prop_assert_eq!(&cycle[0], &node(order[0]));
                }
                other => prop_assert!(false, "expected cycle, got {:?}", other),
            }
        }
    }
}
