#![forbid(unsafe_code)]

use itertools::Itertools;
use log::debug;
use log::info;

use automin_io::LargeFormatter;
use automin_utilities::debug_trace;

use crate::Automaton;
use crate::AutomatonBuilder;
use crate::StateIndex;
use crate::SymbolIndex;
use crate::TargetSet;
use crate::ValidationError;

impl Automaton {
    /// Converts the automaton into an equivalent deterministic automaton using
    /// the subset construction, after removing epsilon transitions.
    ///
    /// # Details
    ///
    /// Every state of the result represents a set of original states and is
    /// named `{id1,id2,...}` after its members in canonical order. The start
    /// set consists of all initial states and is the only initial state. A set
    /// is final when one of its members is final. The empty set `{}` is a sink
    /// with a self loop on every symbol, and is only present when some set has
    /// no successor for a symbol.
    ///
    /// Returns the automaton unchanged when it is already deterministic.
    pub fn determinize(self) -> Result<Automaton, ValidationError> {
        let automaton = self.remove_epsilon()?;
        if automaton.is_deterministic() {
            return Ok(automaton);
        }

        let mut builder = AutomatonBuilder::new();

        // The sets of original states, indexed by their state in the builder.
        let mut subsets: Vec<TargetSet> = Vec::new();

        let start: TargetSet = automaton.initials().iter().copied().collect();
        let start_index = builder.add_state(&subset_id(&automaton, &start));
        builder.set_initial(start_index, true);
        subsets.push(start);

        // The subsets that are not yet explored form the tail of `subsets`.
        let mut next = 0;
        while next < subsets.len() {
            let subset_index = StateIndex::new(next);
            let subset = subsets[next].clone();

            let mut transitions = Vec::with_capacity(automaton.alphabet().len());
            for symbol in 0..automaton.alphabet().len() {
                let symbol = SymbolIndex::new(symbol);

                let mut successor = TargetSet::new();
                for member in &subset {
                    successor.union_with(automaton.state(*member).targets(symbol));
                }

                let id = subset_id(&automaton, &successor);
                debug_trace!("Subset {} --[{}]-> {id}", builder.state(subset_index).id(), automaton.alphabet()[symbol]);

                let (successor_index, created) = builder.insert_state(&id);
                if created {
                    subsets.push(successor);
                }
                transitions.push(TargetSet::singleton(successor_index));
            }

            let is_final = subset.iter().any(|member| automaton.state(member).is_final());
            builder.set_final(subset_index, is_final);
            builder.set_transitions(subset_index, transitions);

            next += 1;
        }

        debug_assert_eq!(builder.num_of_states(), subsets.len());
        debug!("Explored {} subsets", LargeFormatter(builder.num_of_states()));

        let result = builder.finish(automaton.alphabet().to_vec());
        info!(
            "Determinized automaton with {} states into {} states",
            LargeFormatter(automaton.num_of_states()),
            LargeFormatter(result.num_of_states())
        );
        Ok(result)
    }
}

/// Returns the identifier of the state representing the given set of states.
fn subset_id(automaton: &Automaton, subset: &TargetSet) -> String {
    format!("{{{}}}", subset.iter().map(|member| automaton.state(member).id()).join(","))
}

#[cfg(test)]
mod tests {
    use indoc::indoc;
    use test_log::test;

    use automin_utilities::random_test;

    use crate::Automaton;
    use crate::random_automaton;

    #[test]
    fn test_subset_construction() {
        let automaton: Automaton = indoc! {"
            NFA a b
            >1 1|2 1
            2 - 3
            <3 - -
        "}
        .parse()
        .unwrap();

        let result = automaton.determinize().unwrap();

        assert!(result.is_deterministic());
        assert_eq!(
            result.to_string(),
            indoc! {"
                DFA a b
                {1,2} {1,2} {1,3}
                <{1,3} {1,2} {1}
                >{1} {1,2} {1}
            "}
        );
    }

    #[test]
    fn test_empty_subset_is_sink() {
        let automaton: Automaton = indoc! {"
            NFA a b
            >1 2|3 -
            <2 - -
            3 - 2
        "}
        .parse()
        .unwrap();

        let result = automaton.determinize().unwrap();

        assert_eq!(
            result.to_string(),
            indoc! {"
                DFA a b
                >{1} {2,3} {}
                <{2,3} {} {2}
                <{2} {} {}
                {} {} {}
            "}
        );
    }

    #[test]
    fn test_multiple_initial_states() {
        let automaton: Automaton = indoc! {"
            NFA a
            >1 2
            >2 -
            <3 3
        "}
        .parse()
        .unwrap();

        let result = automaton.determinize().unwrap();

        assert_eq!(result.initials().len(), 1);
        assert_eq!(result.to_string(), "DFA a\n>{1,2} {2}\n{2} {}\n{} {}\n");
    }

    #[test]
    fn test_deterministic_is_unchanged() {
        let automaton: Automaton = "DFA a\n>1 2\n<2 -\n".parse().unwrap();

        assert_eq!(automaton.clone().determinize().unwrap(), automaton);
    }

    #[test]
    #[cfg_attr(miri, ignore)]
    fn test_random_determinize() {
        random_test(100, |rng| {
            let automaton = random_automaton(rng, 6, 2, 2, true);

            let result = automaton.clone().determinize().unwrap();
            assert!(result.is_deterministic(), "{automaton} determinized into {result}");
        })
    }
}
