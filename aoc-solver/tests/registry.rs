use aoc_solver::{
    AocParser, AocSolver, DynSolver, ParseError, PartSolver, RegisterableSolver,
    RegistrationError, SolveError, SolverError, SolverRegistryBuilder,
};

#[derive(AocSolver)]
#[aoc_solver(max_parts = 2)]
struct Lengths;

impl AocParser for Lengths {
    type SharedData<'a> = Vec<&'a str>;

    fn parse<'a>(input: &'a str) -> Result<Self::SharedData<'a>, ParseError> {
        if input.trim().is_empty() {
            return Err(ParseError::MissingData("no words".into()));
        }
        Ok(input.split_whitespace().collect())
    }
}

impl PartSolver<1> for Lengths {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.len().to_string())
    }
}

impl PartSolver<2> for Lengths {
    fn solve(shared: &mut Self::SharedData<'_>) -> Result<String, SolveError> {
        Ok(shared.iter().map(|w| w.len()).sum::<usize>().to_string())
    }
}

fn registry() -> aoc_solver::SolverRegistry {
    Lengths
        .register_with(SolverRegistryBuilder::new(), 2020, 4)
        .unwrap()
        .build()
}

#[test]
fn created_solver_reports_metadata_and_answers() {
    let registry = registry();
    let mut solver = registry.create_solver(2020, 4, "ab cde f").unwrap();

    assert_eq!((solver.year(), solver.day(), solver.parts()), (2020, 4, 2));
    assert!(solver.parse_duration() >= chrono::TimeDelta::zero());
    assert_eq!(solver.solve(1).unwrap().answer, "3");
    assert_eq!(solver.solve(2).unwrap().answer, "6");
    assert!(matches!(solver.solve(3), Err(SolveError::PartOutOfRange(3))));
}

#[test]
fn lookup_errors_are_distinguished() {
    let registry = registry();
    assert!(matches!(
        registry.create_solver(2020, 5, "x"),
        Err(SolverError::NotFound(2020, 5))
    ));
    assert!(matches!(
        registry.create_solver(1999, 1, "x"),
        Err(SolverError::InvalidYearDay(1999, 1))
    ));
    assert!(matches!(
        registry.create_solver(2020, 4, "  "),
        Err(SolverError::ParseError(ParseError::MissingData(_)))
    ));
}

#[test]
fn storage_lists_registered_slots_in_order() {
    let registry = Lengths
        .register_with(SolverRegistryBuilder::new(), 2021, 2)
        .and_then(|b| Lengths.register_with(b, 2019, 9))
        .unwrap()
        .build();

    let slots: Vec<_> = registry
        .storage()
        .iter_info()
        .map(|info| (info.year, info.day, info.parts))
        .collect();
    assert_eq!(slots, vec![(2019, 9, 2), (2021, 2, 2)]);
    assert_eq!(registry.storage().len(), 2);
}

#[test]
fn out_of_range_and_duplicate_registrations_fail() {
    assert!(matches!(
        Lengths.register_with(SolverRegistryBuilder::new(), 2040, 1),
        Err(RegistrationError::InvalidYearDay(2040, 1))
    ));
    let builder = Lengths
        .register_with(SolverRegistryBuilder::new(), 2020, 4)
        .unwrap();
    assert!(matches!(
        Lengths.register_with(builder, 2020, 4),
        Err(RegistrationError::DuplicateSolver(2020, 4))
    ));
}
