//! Coordinate (long algebraic) notation as spoken by UCI engines: `e2e4`, `e7e8q`

use crate::game::error::{GameError, GameResult};
use crate::game::types::{PieceType, ResolvedMove, Square};

/// Origin, destination and optional promotion piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordinateMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<PieceType>,
}

/// Parse a coordinate move
///
/// The promotion letter may be upper or lower case.
///
/// # Errors
///
/// Returns [`GameError::Syntax`] for anything that is not two squares plus an optional
/// promotion letter.
pub fn parse_coordinate(text: &str) -> GameResult<CoordinateMove> {
    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(GameError::syntax(text, "expected a move like e2e4 or e7e8q"));
    }

    let from = Square::from_algebraic(&text[0..2])
        .ok_or_else(|| GameError::syntax(&text[0..2], "bad origin square"))?;
    let to = Square::from_algebraic(&text[2..4])
        .ok_or_else(|| GameError::syntax(&text[2..4], "bad destination square"))?;

    let promotion = match text[4..].chars().next() {
        None => None,
        Some(c) => {
            let kind = PieceType::from_letter(c.to_ascii_uppercase())
                .filter(|k| k.is_promotion_target())
                .ok_or_else(|| GameError::syntax(c.to_string(), "bad promotion letter"))?;
            Some(kind)
        }
    };

    if from == to {
        return Err(GameError::syntax(text, "origin and destination are the same"));
    }

    Ok(CoordinateMove {
        from,
        to,
        promotion,
    })
}

/// Whether the text has the shape of a coordinate move rather than SAN
///
/// A fifth character only counts when it is a promotion letter, so SAN with a full origin
/// and a trailing `+` or `#` (`e2e4+`) is left to the SAN parser.
pub fn looks_like_coordinate(text: &str) -> bool {
    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return false;
    }
    let promotion_ok = text[4..].chars().all(|c| {
        PieceType::from_letter(c.to_ascii_uppercase()).is_some_and(|k| k.is_promotion_target())
    });
    promotion_ok
        && Square::from_algebraic(&text[0..2]).is_some()
        && Square::from_algebraic(&text[2..4]).is_some()
}

/// Write a resolved move in coordinate notation
pub fn to_coordinate(mv: &ResolvedMove) -> String {
    let mut text = format!("{}{}", mv.from, mv.to);
    if let Some(letter) = mv.promotion.and_then(|k| k.letter()) {
        text.push(letter.to_ascii_lowercase());
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_and_promotion() {
        let mv = parse_coordinate("e2e4").unwrap();
        assert_eq!(mv.from.to_algebraic(), "e2");
        assert_eq!(mv.to.to_algebraic(), "e4");
        assert_eq!(mv.promotion, None);

        let mv = parse_coordinate("e7e8q").unwrap();
        assert_eq!(mv.promotion, Some(PieceType::Queen));
        assert_eq!(parse_coordinate("a2a1N").unwrap().promotion, Some(PieceType::Knight));
    }

    #[test]
    fn test_rejects_garbage() {
        for text in ["", "e2", "e2e9", "e2e4k", "0000", "e2e2", "e2e4qq"] {
            assert!(parse_coordinate(text).is_err(), "{text:?}");
        }
    }

    #[test]
    fn test_shape_detection() {
        assert!(looks_like_coordinate("g1f3"));
        assert!(looks_like_coordinate("e7e8q"));
        assert!(!looks_like_coordinate("Nf3"));
        assert!(!looks_like_coordinate("O-O"));
    }

    #[test]
    fn test_annotated_san_with_full_origin_is_not_coordinate() {
        assert!(!looks_like_coordinate("e2e4+"));
        assert!(!looks_like_coordinate("e7e8#"));
        assert!(looks_like_coordinate("e7e8N"));
    }
}
