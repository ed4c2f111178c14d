//! Validation of raw text typed by the player.

use crate::*;

fn non_empty(text: &str) -> Result<&str> {
    let text = text.trim();
    if text.is_empty() {
        Err(GameError::EmptyInput)
    } else {
        Ok(text)
    }
}

pub fn parse_answer(text: &str) -> Result<i64> {
    non_empty(text)?
        .parse()
        .map_err(|_| GameError::NotANumber)
}

pub fn parse_letter(text: &str) -> Result<char> {
    let mut chars = non_empty(text)?.chars();
    match (chars.next(), chars.next()) {
        (Some(letter), None) if letter.is_ascii_alphabetic() => Ok(letter.to_ascii_uppercase()),
        _ => Err(GameError::InvalidLetter),
    }
}

pub fn parse_throw(text: &str) -> Result<Throw> {
    let text = non_empty(text)?;
    Throw::ALL
        .into_iter()
        .find(|throw| {
            text.eq_ignore_ascii_case(throw.name())
                || text.eq_ignore_ascii_case(&throw.name()[..1])
        })
        .ok_or(GameError::InputMismatch)
}

pub fn parse_logic_answer(sign_bit: &str, magnitude: &str) -> Result<LogicAnswer> {
    let sign_bit = match non_empty(sign_bit)? {
        "0" => 0,
        "1" => 1,
        _ => return Err(GameError::InvalidSignBit),
    };
    let magnitude = non_empty(magnitude)?
        .parse()
        .map_err(|_| GameError::NotANumber)?;
    Ok(LogicAnswer {
        sign_bit,
        magnitude,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn answers_must_be_whole_numbers() {
        assert_eq!(parse_answer(" 6 "), Ok(6));
        assert_eq!(parse_answer("-14"), Ok(-14));
        assert_eq!(parse_answer("+3"), Ok(3));
        assert_eq!(parse_answer(""), Err(GameError::EmptyInput));
        assert_eq!(parse_answer("   "), Err(GameError::EmptyInput));
        assert_eq!(parse_answer("6.5"), Err(GameError::NotANumber));
        assert_eq!(parse_answer("six"), Err(GameError::NotANumber));
    }

    #[test]
    fn letters_are_single_alphabetic_chars() {
        assert_eq!(parse_letter("s"), Ok('S'));
        assert_eq!(parse_letter(" Q "), Ok('Q'));
        assert_eq!(parse_letter(""), Err(GameError::EmptyInput));
        assert_eq!(parse_letter("ab"), Err(GameError::InvalidLetter));
        assert_eq!(parse_letter("7"), Err(GameError::InvalidLetter));
        assert_eq!(parse_letter("é"), Err(GameError::InvalidLetter));
    }

    #[test]
    fn throws_accept_names_and_initials() {
        assert_eq!(parse_throw("Rock"), Ok(Throw::Rock));
        assert_eq!(parse_throw("p"), Ok(Throw::Paper));
        assert_eq!(parse_throw("SCISSORS"), Ok(Throw::Scissors));
        assert_eq!(parse_throw("lizard"), Err(GameError::InputMismatch));
    }

    #[test]
    fn logic_answers_need_a_bit_and_a_magnitude() {
        assert_eq!(
            parse_logic_answer("0", "12"),
            Ok(LogicAnswer {
                sign_bit: 0,
                magnitude: 12
            })
        );
        assert_eq!(parse_logic_answer("2", "12"), Err(GameError::InvalidSignBit));
        assert_eq!(parse_logic_answer("1", "-3"), Err(GameError::NotANumber));
        assert_eq!(parse_logic_answer("1", ""), Err(GameError::EmptyInput));
    }
}
