/// Domain keyword -> supportive phrase. `{name}` is replaced with the child's name.
const DOMAIN_PHRASES: [(&str, &str); 8] = [
    ("Sensory", "builds {name}'s sensory awareness and exploration"),
    ("Fine Motor", "strengthens {name}'s hand coordination and precision"),
    ("Gross Motor", "develops {name}'s movement and body control"),
    ("Cognitive", "encourages {name}'s problem-solving and flexible thinking"),
    ("Language", "supports {name}'s communication and language growth"),
    ("Social-Emotional", "nurtures {name}'s social skills and self-confidence"),
    ("Creative", "sparks {name}'s imagination and creative expression"),
    ("STEM", "introduces {name} to early science and math ideas"),
];

/// One-sentence reason for a recommendation, keyed on the product's first domain
pub fn rationale_for(domains: &[String], child_name: &str) -> String {
    let Some(primary) = domains.first() else {
        return format!("Supports {}'s growth and exploration.", child_name);
    };

    let primary_lower = primary.to_lowercase();

    match DOMAIN_PHRASES
        .iter()
        .find(|(key, _)| primary_lower.contains(&key.to_lowercase()))
    {
        Some((_, phrase)) => format!("This {}.", phrase.replace("{name}", child_name)),
        None => format!("Supports {}'s {} development.", child_name, primary_lower),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_domains() {
        assert_eq!(rationale_for(&[], "Mia"), "Supports Mia's growth and exploration.");
    }

    #[test]
    fn test_known_domain() {
        let domains = vec!["Gross Motor Skills".to_string(), "Sensory".to_string()];
        assert_eq!(
            rationale_for(&domains, "Mia"),
            "This develops Mia's movement and body control."
        );
    }

    #[test]
    fn test_unknown_domain_falls_back() {
        let domains = vec!["Music".to_string()];
        assert_eq!(rationale_for(&domains, "Leo"), "Supports Leo's music development.");
    }
}
