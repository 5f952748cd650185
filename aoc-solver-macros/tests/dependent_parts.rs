use aoc_solver::{AocParser, AocSolver, ParseError, PartSolver, SolveError, Solver};

#[derive(Debug)]
struct Readings {
    values: Vec<i64>,
    total: Option<i64>,
}

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct RunningTotal;

impl AocParser for RunningTotal {
    type SharedData<'a> = Readings;

    fn parse(input: &str) -> Result<Self::SharedData<'_>, ParseError> {
        let values = input
            .lines()
            .map(|line| {
                line.trim()
                    .parse()
                    .map_err(|_| ParseError::InvalidFormat(format!("not a number: {line}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Readings {
            values,
            total: None,
        })
    }
}

// Part 1 leaves its total behind for part 2
impl PartSolver<1> for RunningTotal {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total = shared.values.iter().sum();
        shared.total = Some(total);
        Ok(total.to_string())
    }
}

impl PartSolver<2> for RunningTotal {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        let total = shared
            .total
            .ok_or(SolveError::PartNotImplemented(2))?;
        Ok((total * shared.values.len() as i64).to_string())
    }
}

#[test]
fn part_two_reads_what_part_one_stored() {
    let mut shared = RunningTotal::parse("1\n2\n3").unwrap();
    assert_eq!(RunningTotal::solve_part(&mut shared, 1).unwrap(), "6");
    assert_eq!(shared.total, Some(6));
    assert_eq!(RunningTotal::solve_part(&mut shared, 2).unwrap(), "18");
}

#[test]
fn part_two_alone_fails_without_stored_total() {
    let mut shared = RunningTotal::parse("4\n5").unwrap();
    assert!(matches!(
        RunningTotal::solve_part(&mut shared, 2),
        Err(SolveError::PartNotImplemented(2))
    ));
}

#[test]
fn generated_dispatch_rejects_unknown_parts() {
    let mut shared = RunningTotal::parse("1").unwrap();
    assert_eq!(RunningTotal::PARTS, 2);
    assert!(matches!(
        RunningTotal::solve_part(&mut shared, 3),
        Err(SolveError::PartOutOfRange(3))
    ));
    assert!(matches!(
        RunningTotal::solve_part(&mut shared, 0),
        Err(SolveError::PartOutOfRange(0))
    ));
}
