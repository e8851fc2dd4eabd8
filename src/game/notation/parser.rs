//! SAN-style move parser
//!
//! Turns text such as `Nf3`, `exd5`, `R1e2`, `e8=Q+` or `O-O-O` into a [`MoveIntent`]
//! without looking at any position. The parser scans from the end of the string: the
//! check suffix first, then the promotion piece, then the destination square, leaving the
//! piece letter and origin hints at the front.

use crate::game::error::{GameError, GameResult};
use crate::game::types::{Annotation, CastleSide, File, MoveIntent, PieceType, Rank, Square};

/// Parse one move in SAN-like notation
///
/// # Errors
///
/// - [`GameError::Syntax`] when the text matches no production
/// - [`GameError::Format`] when the text is grammatical but impossible regardless of
///   position: a promotion on a non-pawn, a pawn capture without origin file, or a pawn
///   capture from a non-adjacent file
///
/// # Example
///
/// ```rust,ignore
/// let intent = parse("Nbd2")?;
/// ```
pub fn parse(text: &str) -> GameResult<MoveIntent> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(GameError::syntax("", "empty move"));
    }

    let (body, annotation) = split_annotation(trimmed);
    if body.is_empty() {
        return Err(GameError::syntax(trimmed, "annotation without a move"));
    }

    if let Some(side) = castle_side(body) {
        return Ok(MoveIntent::Castle { side, annotation });
    }

    let (body, promotion) = split_promotion(body)?;

    let chars: Vec<char> = body.chars().collect();
    if chars.len() < 2 {
        return Err(GameError::syntax(body, "expected a destination square"));
    }
    let dest_text: String = chars[chars.len() - 2..].iter().collect();
    let destination = Square::from_algebraic(&dest_text)
        .ok_or_else(|| GameError::syntax(dest_text.as_str(), "expected a destination square"))?;

    let mut prefix = &chars[..chars.len() - 2];

    let piece = match prefix.first().and_then(|&c| PieceType::from_letter(c)) {
        Some(kind) => {
            prefix = &prefix[1..];
            kind
        }
        None => PieceType::Pawn,
    };

    let capture = prefix.last() == Some(&'x');
    if capture {
        prefix = &prefix[..prefix.len() - 1];
    }

    let (from_file, from_rank) = parse_hints(prefix)?;

    let intent = MoveIntent::Normal {
        piece,
        destination,
        from_file,
        from_rank,
        capture,
        promotion,
        annotation,
    };
    check_shape(&intent)?;
    Ok(intent)
}

fn split_annotation(text: &str) -> (&str, Option<Annotation>) {
    if let Some(rest) = text.strip_suffix('#') {
        (rest, Some(Annotation::Checkmate))
    } else if let Some(rest) = text.strip_suffix('+') {
        (rest, Some(Annotation::Check))
    } else {
        (text, None)
    }
}

fn castle_side(body: &str) -> Option<CastleSide> {
    match body {
        "O-O" | "0-0" => Some(CastleSide::Kingside),
        "O-O-O" | "0-0-0" => Some(CastleSide::Queenside),
        _ => None,
    }
}

/// Strip `=X` or a bare trailing `X` promotion suffix
fn split_promotion(body: &str) -> GameResult<(&str, Option<PieceType>)> {
    let Some(last) = body.chars().last() else {
        return Ok((body, None));
    };
    if last == '=' {
        return Err(GameError::syntax("=", "expected a promotion piece after '='"));
    }
    if !last.is_ascii_uppercase() {
        return Ok((body, None));
    }

    let rest = &body[..body.len() - 1];
    let (rest, explicit) = match rest.strip_suffix('=') {
        Some(stripped) => (stripped, true),
        None => (rest, false),
    };
    // a bare letter only counts as promotion right after a rank digit
    if !explicit && !rest.ends_with(|c: char| c.is_ascii_digit()) {
        return Err(GameError::syntax(body, "unexpected piece letter"));
    }

    match PieceType::from_letter(last) {
        Some(kind) if kind.is_promotion_target() => Ok((rest, Some(kind))),
        Some(kind) => Err(GameError::format(format!("cannot promote to a {kind}"))),
        None => Err(GameError::syntax(
            last.to_string(),
            "promotion piece must be one of Q, R, B, N",
        )),
    }
}

fn parse_hints(prefix: &[char]) -> GameResult<(Option<File>, Option<Rank>)> {
    let text: String = prefix.iter().collect();
    let invalid = || GameError::syntax(text.as_str(), "expected an origin file and/or rank");
    match prefix {
        [] => Ok((None, None)),
        [c] => {
            if let Some(file) = File::from_char(*c) {
                Ok((Some(file), None))
            } else if let Some(rank) = Rank::from_char(*c) {
                Ok((None, Some(rank)))
            } else {
                Err(invalid())
            }
        }
        [f, r] => {
            let file = File::from_char(*f).ok_or_else(invalid)?;
            let rank = Rank::from_char(*r).ok_or_else(invalid)?;
            Ok((Some(file), Some(rank)))
        }
        _ => Err(invalid()),
    }
}

/// Position-independent sanity checks on a grammatical intent
fn check_shape(intent: &MoveIntent) -> GameResult<()> {
    let MoveIntent::Normal {
        piece,
        destination,
        from_file,
        capture,
        promotion,
        ..
    } = *intent
    else {
        return Ok(());
    };

    if piece != PieceType::Pawn {
        if promotion.is_some() {
            return Err(GameError::format(format!("a {piece} cannot promote")));
        }
        return Ok(());
    }

    let file_gap = from_file.map(|f| f.index().abs_diff(destination.file.index()));
    match (capture, file_gap) {
        (true, None) => Err(GameError::format("pawn capture needs an origin file")),
        (true, Some(gap)) if gap != 1 => Err(GameError::format(
            "pawn captures must come from an adjacent file",
        )),
        (false, Some(gap)) if gap != 0 => Err(GameError::format(
            "a pawn changing file must capture",
        )),
        _ => Ok(()),
    }
}
