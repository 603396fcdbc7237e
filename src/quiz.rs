use std::collections::BTreeSet;

use rand::{seq::SliceRandom, Rng};

use crate::{database::Item, error::Error, Result};

pub const OPTION_COUNT: usize = 4;

/// A multiple-choice question about one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub item_id: i64,
    pub word: String,
    pub answer: String,
    pub options: [String; OPTION_COUNT],
}

impl Question {
    pub fn is_correct(&self, choice: &str) -> bool {
        choice == self.answer
    }
}

/// Picks a target from `candidates` and three distractors from the whole
/// catalog's `meanings`. Returns `None` when there is nothing to ask.
pub fn prepare<R: Rng + ?Sized>(
    candidates: &[Item],
    meanings: &[String],
    rng: &mut R,
) -> Result<Option<Question>> {
    let Some(target) = candidates.choose(rng) else {
        return Ok(None);
    };

    let mut catalog: BTreeSet<&str> = meanings.iter().map(String::as_str).collect();
    catalog.insert(target.meaning.as_str());

    if catalog.len() < OPTION_COUNT {
        return Err(Error::InsufficientCatalog {
            meanings: catalog.len(),
        });
    }

    catalog.remove(target.meaning.as_str());
    let catalog: Vec<&str> = catalog.into_iter().collect();

    let mut options: Vec<String> = catalog
        .choose_multiple(rng, OPTION_COUNT - 1)
        .map(|meaning| meaning.to_string())
        .collect();
    options.push(target.meaning.clone());
    options.shuffle(rng);

    let options: [String; OPTION_COUNT] = options
        .try_into()
        .map_err(|_| Error::InsufficientCatalog { meanings: catalog.len() + 1 })?;

    tracing::debug!(item_id = target.id, word = %target.word, "question prepared");

    Ok(Some(Question {
        item_id: target.id,
        word: target.word.clone(),
        answer: target.meaning.clone(),
        options,
    }))
}
