//! Multiple-choice questions on Le Chatelier's principle.

use crate::spawn::SpawnContext;

/// A question with four options and the index of the right one.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Challenge {
    pub question: &'static str,
    pub options: [&'static str; 4],
    pub answer: usize,
}

/// Result of grading one answer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Correct,
    Incorrect,
}

impl Verdict {
    pub fn is_correct(self) -> bool {
        self == Verdict::Correct
    }

    /// Feedback shown under the options.
    pub fn feedback(self) -> &'static str {
        match self {
            Verdict::Correct => "Correct! That's the right application of Le Chatelier's Principle.",
            Verdict::Incorrect => "Not quite. Review Le Chatelier's Principle and try again.",
        }
    }

    /// Feedback color as a hex string.
    pub fn color(self) -> &'static str {
        match self {
            Verdict::Correct => "#27ae60",
            Verdict::Incorrect => "#e74c3c",
        }
    }
}

/// Built-in question bank.
pub const CHALLENGES: [Challenge; 3] = [
    Challenge {
        question: "If you add more reactant A to a system at equilibrium, what will happen?",
        options: [
            "Equilibrium shifts right (toward products)",
            "Equilibrium shifts left (toward reactants)",
            "Equilibrium position doesn't change",
            "Reaction rate decreases",
        ],
        answer: 0,
    },
    Challenge {
        question: "For an exothermic reaction, what happens when you increase the temperature?",
        options: [
            "Equilibrium shifts right (toward products)",
            "Equilibrium shifts left (toward reactants)",
            "Equilibrium position doesn't change",
            "More heat is produced",
        ],
        answer: 1,
    },
    Challenge {
        question: "What effect does a catalyst have on the position of equilibrium?",
        options: [
            "Shifts equilibrium right (toward products)",
            "Shifts equilibrium left (toward reactants)",
            "No effect on equilibrium position",
            "Prevents the reaction from reaching equilibrium",
        ],
        answer: 2,
    },
];

impl Challenge {
    /// Pick a question uniformly at random.
    pub fn random(ctx: &mut SpawnContext) -> &'static Challenge {
        &CHALLENGES[ctx.index(CHALLENGES.len())]
    }

    /// Grade the option at `choice`. Out-of-range choices are wrong.
    pub fn grade(&self, choice: usize) -> Verdict {
        if choice == self.answer {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        }
    }

    /// The correct option's text, `None` if `answer` is out of range.
    pub fn correct_option(&self) -> Option<&'static str> {
        self.options.get(self.answer).copied()
    }
}

impl crate::Simulation {
    /// Draw a question using the simulation's RNG.
    pub fn challenge(&mut self) -> &'static Challenge {
        Challenge::random(&mut self.spawn)
    }
}
