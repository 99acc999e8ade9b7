#![forbid(unsafe_code)]

use rand::Rng;

use crate::Automaton;
use crate::AutomatonBuilder;
use crate::EPSILON;
use crate::TargetSet;

/// Generates a random automaton with the given number of states and symbols,
/// where every state has at most `outdegree` targets per symbol. When
/// `epsilon` is set the alphabet also contains the epsilon symbol.
///
/// The state `1` is always initial and at least one state is final, so the
/// result passes validation.
pub fn random_automaton(
    rng: &mut impl Rng,
    num_of_states: usize,
    num_of_symbols: usize,
    outdegree: usize,
    epsilon: bool,
) -> Automaton {
    assert!(
        num_of_symbols <= 26,
        "Too many symbols requested, we only support alphabetic symbols."
    );
    assert!(num_of_states > 0, "At least one state is required");

    // Introduce lower case letters for the symbols.
    let mut alphabet: Vec<String> = (b'a'..=b'z')
        .take(num_of_symbols)
        .map(|letter| char::from(letter).to_string())
        .collect();
    if epsilon {
        alphabet.push(EPSILON.to_string());
    }

    let mut builder = AutomatonBuilder::new();
    let states: Vec<_> = (1..=num_of_states)
        .map(|number| builder.add_state(&number.to_string()))
        .collect();

    for &state in &states {
        let transitions = alphabet
            .iter()
            .map(|_| {
                (0..rng.random_range(0..=outdegree))
                    .map(|_| states[rng.random_range(0..num_of_states)])
                    .collect::<TargetSet>()
            })
            .collect();

        builder.set_transitions(state, transitions);
        builder.set_initial(state, rng.random_bool(0.1));
        builder.set_final(state, rng.random_bool(0.3));
    }

    builder.set_initial(states[0], true);
    builder.set_final(states[rng.random_range(0..num_of_states)], true);

    builder.finish(alphabet)
}

#[cfg(test)]
mod tests {
    use automin_utilities::random_test;

    use super::*;

    #[test]
    fn test_random_automaton_is_valid() {
        random_test(100, |rng| {
            let automaton = random_automaton(rng, 10, 3, 3, true);

            assert_eq!(automaton.num_of_states(), 10);
            assert_eq!(automaton.alphabet().len(), 4);
            automaton.validate().unwrap();
        })
    }
}
