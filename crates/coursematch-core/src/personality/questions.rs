use super::{Dimension, Polarity, Question};

/// Create the fixed question bank, three questions per axis.
pub fn default_questions() -> Vec<Question> {
    use Dimension::*;
    use Polarity::*;

    [
        ("E/I-1", "You prefer spending time with others rather than alone", EI, Positive),
        ("E/I-2", "You feel energized after social gatherings", EI, Positive),
        ("E/I-3", "You think out loud and process ideas by talking", EI, Positive),
        ("S/N-1", "You focus on facts and concrete details", SN, Positive),
        ("S/N-2", "You enjoy thinking about possibilities and future potential", SN, Negative),
        ("S/N-3", "You prefer practical, hands-on approaches", SN, Positive),
        ("T/F-1", "You make decisions based on logic and objective analysis", TF, Positive),
        ("T/F-2", "You prioritize harmony and consider others' feelings in decisions", TF, Negative),
        ("T/F-3", "You value fairness and consistency over personal considerations", TF, Positive),
        ("J/P-1", "You prefer structure and planning over spontaneity", JP, Positive),
        ("J/P-2", "You like to keep your options open and adapt as you go", JP, Negative),
        ("J/P-3", "You work better with deadlines and clear schedules", JP, Positive),
    ]
    .into_iter()
    .map(|(id, text, dimension, polarity)| Question {
        id: id.to_string(),
        text: text.to_string(),
        dimension,
        polarity,
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn bank_covers_every_axis_equally() {
        let questions = default_questions();
        assert_eq!(questions.len(), 12);
        for dimension in Dimension::ALL {
            let count = questions.iter().filter(|q| q.dimension == dimension).count();
            assert_eq!(count, 3, "axis {dimension}");
        }
    }

    #[test]
    fn question_ids_are_unique() {
        let questions = default_questions();
        let ids: HashSet<_> = questions.iter().map(|q| q.id.as_str()).collect();
        assert_eq!(ids.len(), questions.len());
    }

    #[test]
    fn reverse_worded_questions_have_negative_polarity() {
        let questions = default_questions();
        let negative: Vec<_> = questions
            .iter()
            .filter(|q| q.polarity == Polarity::Negative)
            .map(|q| q.id.as_str())
            .collect();
        assert_eq!(negative, vec!["S/N-2", "T/F-2", "J/P-2"]);
    }
}
