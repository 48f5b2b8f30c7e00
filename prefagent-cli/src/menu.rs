//! Interactive menu.
use std::io::{BufRead, Write};

use anyhow::Error;
use rand::Rng;

use prefagent::{PreferenceProblem, ProblemError};

use crate::report::{self, Logic};

/// Let the user pick a logic and reasoning tasks until they exit or the input ends.
pub fn run_menu(
    problem: &PreferenceProblem,
    rng: &mut impl Rng,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<(), Error> {
    writeln!(out, "Welcome to PrefAgent!")?;
    writeln!(out)?;

    loop {
        writeln!(out, "Choose the preference logic to use:")?;
        writeln!(out, "1. Penalty Logic")?;
        writeln!(out, "2. Qualitative Choice Logic")?;
        writeln!(out, "3. Exit")?;

        let logic = match read_choice(input, out)?.as_deref() {
            Some("1") => Logic::Penalty,
            Some("2") => Logic::Qualitative,
            Some("3") | None => break,
            Some(_) => {
                writeln!(out, "Invalid Choice! Please try again.")?;
                continue;
            }
        };

        if !task_menu(problem, logic, rng, input, out)? {
            break;
        }
    }

    writeln!(out, "Bye!")?;
    Ok(())
}

/// Returns `false` when the input ended.
fn task_menu(
    problem: &PreferenceProblem,
    logic: Logic,
    rng: &mut impl Rng,
    input: &mut impl BufRead,
    out: &mut impl Write,
) -> Result<bool, Error> {
    loop {
        writeln!(out, "Choose the reasoning task to perform:")?;
        writeln!(out, "1. Encoding")?;
        writeln!(out, "2. Feasibility Checking")?;
        writeln!(out, "3. Show the Table")?;
        writeln!(out, "4. Exemplification")?;
        writeln!(out, "5. Omni-optimization")?;
        writeln!(out, "6. Back to previous menu")?;

        let result = match read_choice(input, out)?.as_deref() {
            Some("1") => report::encoding(problem, out),
            Some("2") => report::feasibility(problem, out),
            Some("3") => report::table(problem, logic, out),
            Some("4") => report::exemplify(problem, logic, rng, out),
            Some("5") => report::optimize(problem, logic, out),
            Some("6") => return Ok(true),
            None => return Ok(false),
            Some(_) => {
                writeln!(out, "Invalid Choice! Please try again.")?;
                continue;
            }
        };

        // A task that cannot be performed on this problem does not end the session.
        if let Err(err) = result {
            match err.downcast_ref::<ProblemError>() {
                Some(problem_err) => writeln!(out, "{}", problem_err)?,
                None => return Err(err),
            }
        }
    }
}

fn read_choice(input: &mut impl BufRead, out: &mut impl Write) -> Result<Option<String>, Error> {
    write!(out, "Your Choice: ")?;
    out.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        writeln!(out)?;
        return Ok(None);
    }
    Ok(Some(line.trim().to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use crate::report::tests::problem;

    fn session(constraints: &str, input: &str) -> String {
        let problem = problem(constraints);
        let mut rng = StdRng::seed_from_u64(1);
        let mut out = vec![];
        run_menu(&problem, &mut rng, &mut input.as_bytes(), &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn runs_tasks_until_exit() {
        let text = session("big OR red", "1\n2\n5\n6\n2\n5\n6\n3\n");

        assert!(text.starts_with("Welcome to PrefAgent!\n\nChoose the preference logic to use:"));
        assert!(text.contains("Yes, there are 3 feasible objects.\n"));
        assert!(text.contains("All optimal objects: o3\n"));
        assert!(text.contains("All optimal objects: o2\n"));
        assert!(text.ends_with("Your Choice: Bye!\n"));
    }

    #[test]
    fn invalid_choices_are_repeated() {
        let text = session("big OR red", "7\n1\nx\n6\n3\n");

        assert_eq!(text.matches("Invalid Choice! Please try again.").count(), 2);
        assert!(text.ends_with("Bye!\n"));
    }

    #[test]
    fn unavailable_tasks_keep_the_session() {
        let text = session("big AND red", "1\n4\n2\n");

        assert!(text.contains("at least two feasible objects, found 1"));
        assert!(text.contains("Yes, there are 1 feasible objects."));
    }

    #[test]
    fn end_of_input_exits() {
        assert!(session("big", "2\n3\n").ends_with("Your Choice: \nBye!\n"));
        assert!(session("big", "").ends_with("Your Choice: \nBye!\n"));
    }
}
