use dosel_ast::Command;
use dosel_lexer::{Keyword, TokenType};
use nom::branch::alt;
use nom::combinator::{cut, map};
use nom::sequence::{pair, preceded, tuple};

use super::params::{kv_list, name};
use super::{keyword, token, Expectation, PResult, SyntaxError, TokenSlice};

/// One complete sentence followed by end of input.
pub fn command(input: TokenSlice<'_>) -> PResult<'_, Command> {
    let (rest, command) = match alt((
        calculate_dose,
        check_interaction,
        adjust_dose,
        validate_prescription,
        report_regimen,
        alert_threshold,
    ))(input)
    {
        Err(nom::Err::Error(_)) => {
            return Err(nom::Err::Failure(SyntaxError::new(
                input,
                Expectation::Command,
            )))
        }
        other => other?,
    };
    let (rest, _) = cut(end_of_input)(rest)?;
    Ok((rest, command))
}

/// `CALCULATE DOSE FOR <kv-list>`
pub fn calculate_dose(input: TokenSlice<'_>) -> PResult<'_, Command> {
    preceded(
        keyword(Keyword::Calculate),
        cut(map(
            preceded(pair(keyword(Keyword::Dose), keyword(Keyword::For)), kv_list),
            |params| Command::CalculateDose { params },
        )),
    )(input)
}

/// `ADJUST DOSE FOR <kv-list>`
pub fn adjust_dose(input: TokenSlice<'_>) -> PResult<'_, Command> {
    preceded(
        keyword(Keyword::Adjust),
        cut(map(
            preceded(pair(keyword(Keyword::Dose), keyword(Keyword::For)), kv_list),
            |params| Command::AdjustDose { params },
        )),
    )(input)
}

/// `CHECK INTERACTION BETWEEN <ident> AND <ident>`
pub fn check_interaction(input: TokenSlice<'_>) -> PResult<'_, Command> {
    preceded(
        keyword(Keyword::Check),
        cut(map(
            tuple((
                keyword(Keyword::Interaction),
                keyword(Keyword::Between),
                name,
                token(TokenType::And),
                name,
            )),
            |(_, _, drug_a, _, drug_b)| Command::CheckInteraction { drug_a, drug_b },
        )),
    )(input)
}

/// `VALIDATE PRESCRIPTION <kv-list>`
pub fn validate_prescription(input: TokenSlice<'_>) -> PResult<'_, Command> {
    preceded(
        keyword(Keyword::Validate),
        cut(map(
            preceded(keyword(Keyword::Prescription), kv_list),
            |params| Command::ValidatePrescription { params },
        )),
    )(input)
}

/// `REPORT REGIMEN <kv-list>`
pub fn report_regimen(input: TokenSlice<'_>) -> PResult<'_, Command> {
    preceded(
        keyword(Keyword::Report),
        cut(map(
            preceded(keyword(Keyword::Regimen), kv_list),
            |params| Command::ReportRegimen { params },
        )),
    )(input)
}

/// `ALERT WHEN DOSE EXCEEDS SAFETY_LIMIT`
pub fn alert_threshold(input: TokenSlice<'_>) -> PResult<'_, Command> {
    preceded(
        keyword(Keyword::Alert),
        cut(map(
            tuple((
                keyword(Keyword::When),
                keyword(Keyword::Dose),
                keyword(Keyword::Exceeds),
                keyword(Keyword::SafetyLimit),
            )),
            |_| Command::AlertThreshold,
        )),
    )(input)
}

fn end_of_input(input: TokenSlice<'_>) -> PResult<'_, ()> {
    match input.first() {
        None => Ok((input, ())),
        Some(t) if t.is_eof() => Ok((input.advance(), ())),
        Some(_) => Err(nom::Err::Error(SyntaxError::new(
            input,
            Expectation::EndOfInput,
        ))),
    }
}
