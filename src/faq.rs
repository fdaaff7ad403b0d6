/// A canned question offered as a shortcut.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Faq {
    pub question: &'static str,
    /// Quick-help entries carry a category; popular questions don't.
    pub category: Option<&'static str>,
}

const fn quick(question: &'static str, category: &'static str) -> Faq {
    Faq {
        question,
        category: Some(category),
    }
}

const fn popular(question: &'static str) -> Faq {
    Faq {
        question,
        category: None,
    }
}

pub static QUICK_HELP: [Faq; 5] = [
    quick("Library hours", "Facilities"),
    quick("Course registration", "Academic"),
    quick("Upcoming events", "Events"),
    quick("Student services", "Support"),
    quick("Dining hours", "Facilities"),
];

pub static POPULAR_QUESTIONS: [Faq; 6] = [
    popular("How do I register for courses?"),
    popular("What are the library hours?"),
    popular("Where is the student center?"),
    popular("How do I contact academic advisors?"),
    popular("What dining options are available?"),
    popular("How do I access WiFi on campus?"),
];

/// Quick help followed by popular questions, in display order.
pub fn all() -> impl Iterator<Item = &'static Faq> {
    QUICK_HELP.iter().chain(POPULAR_QUESTIONS.iter())
}

/// The question shown as entry `number` (1-based) of [`all`].
pub fn question(number: usize) -> Option<&'static str> {
    number
        .checked_sub(1)
        .and_then(|index| all().nth(index))
        .map(|faq| faq.question)
}
