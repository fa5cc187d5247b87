/*!
 * Primary/secondary directory classification for tree ordering
 */

use log::debug;

use crate::config::TreeRules;
use crate::types::DirClass;

/// Classify a single directory name
pub fn classify(name: &str, rules: &TreeRules) -> DirClass {
    if name.starts_with('.') && !rules.hidden_primary.contains(name) {
        return DirClass::Secondary;
    }

    let lowered = name.to_lowercase();
    if rules
        .secondary_patterns
        .iter()
        .any(|pattern| lowered.contains(pattern.as_str()))
    {
        return DirClass::Secondary;
    }

    DirClass::Primary
}

/// Split directory names into sorted primary and secondary groups
pub fn partition(names: Vec<String>, rules: &TreeRules) -> (Vec<String>, Vec<String>) {
    let (mut primary, mut secondary): (Vec<_>, Vec<_>) = names
        .into_iter()
        .partition(|name| {
            let class = classify(name, rules);
            debug!("{} is {}", name, class);
            class == DirClass::Primary
        });

    primary.sort();
    secondary.sort();

    (primary, secondary)
}
