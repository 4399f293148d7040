//! Interactive recursion prompt.

use std::io::{self, BufRead, Write};

const QUESTION: &str = "Include elements inside blocks? [Yes(Y)/No(N)] <N>: ";

/// Ask whether to descend into blocks until a usable answer arrives.
///
/// `Y` and `N` are accepted in either case and an empty line means `N`.
/// Anything else asks again.
///
/// # Errors
///
/// Returns an I/O error if reading or writing fails, or
/// [`io::ErrorKind::UnexpectedEof`] if input ends before an answer.
pub fn ask_recurse<R, W>(input: &mut R, output: &mut W) -> io::Result<bool>
where
    R: BufRead,
    W: Write,
{
    let mut line = String::new();
    loop {
        write!(output, "{QUESTION}")?;
        output.flush()?;

        line.clear();
        if input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "no answer to the recursion prompt",
            ));
        }

        match line.trim() {
            "" | "n" | "N" => return Ok(false),
            "y" | "Y" => return Ok(true),
            _ => continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    fn answer(text: &str) -> (io::Result<bool>, String) {
        let mut input = Cursor::new(text.as_bytes().to_vec());
        let mut output = Vec::new();
        let result = ask_recurse(&mut input, &mut output);
        (result, String::from_utf8(output).unwrap())
    }

    #[test]
    fn test_yes_and_no() {
        assert!(answer("Y\n").0.unwrap());
        assert!(answer("y\n").0.unwrap());
        assert!(!answer("N\n").0.unwrap());
        assert!(!answer("n\n").0.unwrap());
    }

    #[test]
    fn test_empty_line_defaults_to_no() {
        let (result, output) = answer("\n");

        assert!(!result.unwrap());
        assert_eq!(output, QUESTION);
    }

    #[test]
    fn test_invalid_answers_repeat_the_question() {
        let (result, output) = answer("maybe\nyes\n  Y  \n");

        assert!(result.unwrap());
        assert_eq!(output.matches(QUESTION).count(), 3);
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let (result, _) = answer("what\n");

        assert_eq!(result.unwrap_err().kind(), io::ErrorKind::UnexpectedEof);
    }
}
