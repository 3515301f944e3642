//! Line-synchronized parallel corpus with its Pharaoh word alignment.
//!
//! Three files are read in lockstep: one alignment line (`"0-0 1-2 2-1"`) and
//! one whitespace-tokenized sentence per language. The left side of every
//! `i-j` token indexes the left corpus, the right side the right corpus.

use std::collections::HashSet;
use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::debug;

use crate::{AlignError, AlignResult, Language};

/// Which half of a sentence pair a position belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.write_str("left"),
            Side::Right => f.write_str("right"),
        }
    }
}

/// One `i-j` token of a Pharaoh alignment line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndexPair {
    pub left: usize,
    pub right: usize,
}

impl IndexPair {
    pub fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    pub fn position(&self, side: Side) -> usize {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }
}

/// Parse one Pharaoh alignment line.
///
/// Any token that is not `<int>-<int>` is fatal: skipping it would silently
/// desynchronize the three corpora.
pub fn parse_index_line(line: &str, line_no: usize) -> AlignResult<Vec<IndexPair>> {
    line.split_whitespace()
        .map(|token| {
            let malformed = || AlignError::MalformedIndex {
                line: line_no,
                token: token.to_string(),
            };
            let (left, right) = token.split_once('-').ok_or_else(malformed)?;
            let left = left.parse::<usize>().map_err(|_| malformed())?;
            let right = right.parse::<usize>().map_err(|_| malformed())?;
            Ok(IndexPair::new(left, right))
        })
        .collect()
}

/// A corpus line: the raw text and its whitespace tokens.
#[derive(Debug, Clone, PartialEq)]
pub struct Sentence {
    pub text: String,
    pub tokens: Vec<String>,
}

impl Sentence {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            tokens: text.split_whitespace().map(String::from).collect(),
        }
    }
}

/// An aligned triple of alignment line, left sentence and right sentence.
#[derive(Debug, Clone, PartialEq)]
pub struct SentencePair {
    pub pairs: Vec<IndexPair>,
    pub left: Sentence,
    pub right: Sentence,
}

impl SentencePair {
    /// Build a pair, checking every alignment position against its sentence.
    pub fn new(line_no: usize, index_line: &str, left: &str, right: &str) -> AlignResult<Self> {
        let pair = Self {
            pairs: parse_index_line(index_line, line_no)?,
            left: Sentence::new(left),
            right: Sentence::new(right),
        };

        for index in &pair.pairs {
            for side in [Side::Left, Side::Right] {
                let len = pair.sentence(side).tokens.len();
                let position = index.position(side);
                if position >= len {
                    return Err(AlignError::IndexOutOfRange {
                        line: line_no,
                        position,
                        len,
                        side,
                    });
                }
            }
        }

        Ok(pair)
    }

    pub fn sentence(&self, side: Side) -> &Sentence {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    /// Positions on the opposite side aligned to `position` on `side`, in
    /// alignment-line order.
    pub fn aligned_to(&self, side: Side, position: usize) -> impl Iterator<Item = usize> + '_ {
        let opposite = side.opposite();
        self.pairs
            .iter()
            .filter(move |index| index.position(side) == position)
            .map(move |index| index.position(opposite))
    }

    /// Token positions of `side` that no alignment pair touches.
    pub fn unaligned(&self, side: Side) -> Vec<usize> {
        let aligned: HashSet<usize> = self.pairs.iter().map(|index| index.position(side)).collect();
        (0..self.sentence(side).tokens.len())
            .filter(|position| !aligned.contains(position))
            .collect()
    }
}

/// The whole bitext, held in memory.
#[derive(Debug, Clone)]
pub struct ParallelCorpus {
    left_language: Language,
    sentences: Vec<SentencePair>,
}

impl ParallelCorpus {
    pub fn new(left_language: Language, sentences: Vec<SentencePair>) -> Self {
        Self {
            left_language,
            sentences,
        }
    }

    /// Open the alignment file and both corpora.
    pub fn open(
        left_language: Language,
        alignment: &Path,
        left: &Path,
        right: &Path,
    ) -> AlignResult<Self> {
        let open = |path: &Path| {
            File::open(path)
                .map(BufReader::new)
                .map_err(|e| AlignError::load(path, e))
        };
        let corpus = Self::from_readers(left_language, open(alignment)?, open(left)?, open(right)?)?;
        debug!(
            sentences = corpus.len(),
            alignment = %alignment.display(),
            "loaded parallel corpus"
        );
        Ok(corpus)
    }

    /// Read the three streams in lockstep.
    pub fn from_readers<A, L, R>(
        left_language: Language,
        alignment: A,
        left: L,
        right: R,
    ) -> AlignResult<Self>
    where
        A: BufRead,
        L: BufRead,
        R: BufRead,
    {
        let mut alignment_lines = alignment.lines();
        let mut left_lines = left.lines();
        let mut right_lines = right.lines();
        let mut sentences = Vec::new();

        loop {
            let line_no = sentences.len() + 1;
            match (alignment_lines.next(), left_lines.next(), right_lines.next()) {
                (None, None, None) => break,
                (Some(index), Some(l), Some(r)) => {
                    let index = index.map_err(|e| stream_error("alignment", e))?;
                    let l = l.map_err(|e| stream_error("left corpus", e))?;
                    let r = r.map_err(|e| stream_error("right corpus", e))?;
                    sentences.push(SentencePair::new(line_no, &index, &l, &r)?);
                }
                (index, l, r) => {
                    let seen = sentences.len();
                    return Err(AlignError::CorpusLength {
                        alignment: line_total(seen, index, alignment_lines),
                        left: line_total(seen, l, left_lines),
                        right: line_total(seen, r, right_lines),
                    });
                }
            }
        }

        Ok(Self::new(left_language, sentences))
    }

    /// Convenience constructor over in-memory text, mainly for tests.
    pub fn from_text(
        left_language: Language,
        alignment: &str,
        left: &str,
        right: &str,
    ) -> AlignResult<Self> {
        Self::from_readers(
            left_language,
            alignment.as_bytes(),
            left.as_bytes(),
            right.as_bytes(),
        )
    }

    pub fn left_language(&self) -> Language {
        self.left_language
    }

    pub fn language(&self, side: Side) -> Language {
        match side {
            Side::Left => self.left_language,
            Side::Right => self.left_language.other(),
        }
    }

    pub fn side_of(&self, language: Language) -> Side {
        if language == self.left_language {
            Side::Left
        } else {
            Side::Right
        }
    }

    pub fn sentences(&self) -> &[SentencePair] {
        &self.sentences
    }

    pub fn len(&self) -> usize {
        self.sentences.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.is_empty()
    }
}

fn stream_error(stream: &str, err: io::Error) -> AlignError {
    AlignError::Load {
        path: stream.to_string(),
        message: err.to_string(),
    }
}

fn line_total<B: BufRead>(seen: usize, next: Option<io::Result<String>>, rest: io::Lines<B>) -> usize {
    match next {
        Some(_) => seen + 1 + rest.count(),
        None => seen,
    }
}
