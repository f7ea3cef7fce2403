//! Venn-diagram classification engine
//!
//! Elements are dragged into one of 8 mutually exclusive regions over three
//! sets A, B, C. Placement goes through a single authoritative transition
//! that preserves the partition invariant: every element is in exactly one
//! place (a region or the available pool) at all times. Scoring awards
//! partial credit per correctly placed element and advances only on an
//! exact match of all 8 regions.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::consts::VENN_MAX_POINTS;
use crate::element::Element;

/// The 8 mutually exclusive classification buckets
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    OnlyA,
    OnlyB,
    OnlyC,
    AB,
    AC,
    BC,
    ABC,
    Outside,
}

impl Region {
    pub const ALL: [Region; 8] = [
        Region::OnlyA,
        Region::OnlyB,
        Region::OnlyC,
        Region::AB,
        Region::AC,
        Region::BC,
        Region::ABC,
        Region::Outside,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Region::OnlyA => "only A",
            Region::OnlyB => "only B",
            Region::OnlyC => "only C",
            Region::AB => "A ∩ B",
            Region::AC => "A ∩ C",
            Region::BC => "B ∩ C",
            Region::ABC => "A ∩ B ∩ C",
            Region::Outside => "outside",
        }
    }

    /// Stable region id used by the drag-and-drop surface
    pub fn id(&self) -> &'static str {
        match self {
            Region::OnlyA => "onlyA",
            Region::OnlyB => "onlyB",
            Region::OnlyC => "onlyC",
            Region::AB => "AB",
            Region::AC => "AC",
            Region::BC => "BC",
            Region::ABC => "ABC",
            Region::Outside => "outside",
        }
    }

    pub fn from_id(id: &str) -> Option<Region> {
        Region::ALL.into_iter().find(|r| r.id() == id)
    }
}

/// A classification problem with its ground-truth solution. The solution
/// sets partition the element universe (checked on construction).
#[derive(Debug, Clone, Serialize)]
pub struct VennProblem {
    pub description: String,
    pub elements: Vec<Element>,
    pub solution: BTreeMap<Region, BTreeSet<Element>>,
    pub explanation: String,
}

impl VennProblem {
    pub fn new(
        description: impl Into<String>,
        elements: Vec<Element>,
        solution: BTreeMap<Region, BTreeSet<Element>>,
        explanation: impl Into<String>,
    ) -> Self {
        assert!(!elements.is_empty(), "a problem needs at least one element");
        let problem = Self {
            description: description.into(),
            elements,
            solution,
            explanation: explanation.into(),
        };
        debug_assert!(problem.solution_partitions_universe());
        problem
    }

    /// Every element appears in exactly one region's solution set
    fn solution_partitions_universe(&self) -> bool {
        let mut seen = BTreeSet::new();
        for set in self.solution.values() {
            for e in set {
                if !seen.insert(*e) || !self.elements.contains(e) {
                    return false;
                }
            }
        }
        seen.len() == self.elements.len()
    }

    pub fn total_elements(&self) -> usize {
        self.elements.len()
    }

    /// The region the solution assigns this element to
    pub fn solution_region(&self, element: Element) -> Option<Region> {
        Region::ALL
            .into_iter()
            .find(|r| self.solution.get(r).is_some_and(|s| s.contains(&element)))
    }
}

/// Where a drop came from (the drag-and-drop surface reports this)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    Available,
    Region(Region),
}

/// Result of a placement attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceOutcome {
    Moved,
    /// Advisory no-op: the element is already in the target region
    AlreadyInRegion,
    /// Advisory no-op: not an element of this problem
    UnknownElement,
}

/// The user's current placement: one set per region plus the unplaced pool.
/// Union of all sets always equals the element universe, with no element in
/// two places.
#[derive(Debug, Clone, Serialize)]
pub struct Placement {
    regions: BTreeMap<Region, BTreeSet<Element>>,
    available: BTreeSet<Element>,
}

impl Placement {
    /// Fresh placement: all regions empty, every element available
    pub fn new(elements: &[Element]) -> Self {
        Self {
            regions: Region::ALL.into_iter().map(|r| (r, BTreeSet::new())).collect(),
            available: elements.iter().copied().collect(),
        }
    }

    pub fn available(&self) -> &BTreeSet<Element> {
        &self.available
    }

    pub fn region(&self, region: Region) -> &BTreeSet<Element> {
        &self.regions[&region]
    }

    /// True once every element has been placed somewhere
    pub fn is_complete(&self) -> bool {
        self.available.is_empty()
    }

    /// Atomically move an element into `target`, removing it from wherever
    /// it currently is (the available pool or another region). The reported
    /// origin is advisory; the element's actual location is authoritative.
    pub fn place(&mut self, element: Element, target: Region, origin: Origin) -> PlaceOutcome {
        if self.regions[&target].contains(&element) {
            log::warn!("{} is already in {}", element, target.label());
            return PlaceOutcome::AlreadyInRegion;
        }

        let removed = if self.available.remove(&element) {
            if origin != Origin::Available {
                log::warn!("{} reported from {:?} but was unplaced", element, origin);
            }
            true
        } else {
            match self.locate(element) {
                Some(from) => {
                    if origin != Origin::Region(from) {
                        log::warn!("{} reported from {:?} but was in {}", element, origin, from.label());
                    }
                    self.regions
                        .get_mut(&from)
                        .map(|s| s.remove(&element))
                        .unwrap_or(false)
                }
                None => false,
            }
        };
        if !removed {
            log::warn!("{} is not part of this problem", element);
            return PlaceOutcome::UnknownElement;
        }

        let inserted = self
            .regions
            .get_mut(&target)
            .map(|s| s.insert(element))
            .unwrap_or(false);
        debug_assert!(inserted);
        PlaceOutcome::Moved
    }

    /// The region currently holding this element, if placed
    pub fn locate(&self, element: Element) -> Option<Region> {
        Region::ALL
            .into_iter()
            .find(|r| self.regions[r].contains(&element))
    }

    /// Total elements across the pool and all regions
    pub fn total_elements(&self) -> usize {
        self.available.len() + self.regions.values().map(|s| s.len()).sum::<usize>()
    }
}

/// Result of checking the current placement against the solution
#[derive(Debug, Clone, PartialEq)]
pub enum VennOutcome {
    /// Not all elements placed yet; no scoring happens
    Incomplete { unplaced: usize },
    /// All placed but at least one region differs from the solution
    Partial { accuracy: f64 },
    /// Exact match of all 8 regions; points were awarded
    Solved {
        points: u32,
        explanation: String,
        /// False once the last problem is solved
        advanced: bool,
    },
}

impl VennOutcome {
    pub fn message(&self) -> String {
        match self {
            VennOutcome::Incomplete { unplaced } => {
                format!("Place the remaining {} element(s) first", unplaced)
            }
            VennOutcome::Partial { accuracy } => {
                format!("{:.0}% of elements are in the right region - keep going", accuracy)
            }
            VennOutcome::Solved { points, .. } => format!("Correct! +{} points", points),
        }
    }
}

/// A sequence of classification problems with cumulative score
#[derive(Debug, Clone)]
pub struct VennGame {
    problems: Vec<VennProblem>,
    index: usize,
    score: u32,
    placement: Placement,
    complete: bool,
}

impl VennGame {
    pub fn new(problems: Vec<VennProblem>) -> Self {
        assert!(!problems.is_empty(), "at least one problem required");
        let placement = Placement::new(&problems[0].elements);
        Self {
            problems,
            index: 0,
            score: 0,
            placement,
            complete: false,
        }
    }

    /// The built-in problem set
    pub fn with_standard_problems() -> Self {
        Self::new(standard_problems())
    }

    pub fn problem(&self) -> &VennProblem {
        &self.problems[self.index]
    }

    pub fn problem_index(&self) -> usize {
        self.index
    }

    pub fn problem_count(&self) -> usize {
        self.problems.len()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// True once the last problem has been solved
    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Forward a drop from the drag-and-drop surface
    pub fn place(&mut self, element: Element, target: Region, origin: Origin) -> PlaceOutcome {
        self.placement.place(element, target, origin)
    }

    /// Score the current placement. Only valid once every element is placed;
    /// otherwise reports incomplete without scoring. An exact match advances
    /// to the next problem (or completes the game); a partial match reports
    /// accuracy and stays on the same problem.
    pub fn check_answer(&mut self) -> VennOutcome {
        if !self.placement.is_complete() {
            return VennOutcome::Incomplete {
                unplaced: self.placement.available().len(),
            };
        }

        let problem = &self.problems[self.index];
        let empty = BTreeSet::new();
        let mut total_correct = 0usize;
        let mut total_elements = 0usize;
        let mut all_exact = true;
        for region in Region::ALL {
            let solution = problem.solution.get(&region).unwrap_or(&empty);
            let placed = self.placement.region(region);
            total_elements += solution.len();
            total_correct += placed.intersection(solution).count();
            if placed != solution {
                all_exact = false;
            }
        }

        let accuracy = total_correct as f64 / total_elements as f64 * 100.0;
        if !all_exact {
            log::info!(
                "venn problem {} partial: {}/{} placed correctly",
                self.index,
                total_correct,
                total_elements
            );
            return VennOutcome::Partial { accuracy };
        }

        let points = ((accuracy / 10.0).round() as u32).min(VENN_MAX_POINTS);
        self.score += points;
        let explanation = problem.explanation.clone();

        let advanced = self.index + 1 < self.problems.len();
        if advanced {
            self.index += 1;
            self.placement = Placement::new(&self.problems[self.index].elements);
            log::info!("venn advanced to problem {}", self.index);
        } else {
            self.complete = true;
            log::info!("venn game complete, score {}", self.score);
        }

        VennOutcome::Solved {
            points,
            explanation,
            advanced,
        }
    }

    /// Restart from the first problem with a zeroed score
    pub fn reset(&mut self) {
        self.index = 0;
        self.score = 0;
        self.complete = false;
        self.placement = Placement::new(&self.problems[0].elements);
    }
}

fn nums(values: &[i64]) -> BTreeSet<Element> {
    values.iter().map(|&v| Element::Num(v)).collect()
}

fn syms(values: &[char]) -> BTreeSet<Element> {
    values.iter().map(|&c| Element::Sym(c)).collect()
}

/// The built-in problem sequence
pub fn standard_problems() -> Vec<VennProblem> {
    vec![
        VennProblem::new(
            "A = even numbers, B = numbers less than 9, C = multiples of 3",
            [2, 3, 4, 6, 8, 9, 10, 12, 15, 18]
                .into_iter()
                .map(Element::Num)
                .collect(),
            BTreeMap::from([
                (Region::OnlyA, nums(&[10])),
                (Region::OnlyC, nums(&[9, 15])),
                (Region::AB, nums(&[2, 4, 8])),
                (Region::AC, nums(&[12, 18])),
                (Region::BC, nums(&[3])),
                (Region::ABC, nums(&[6])),
            ]),
            "6 is the only number that is even, less than 9 and a multiple of 3. \
             2, 4 and 8 are even and below 9 but not multiples of 3; 12 and 18 are \
             even multiples of 3 at or above 9; 3 is below 9 and a multiple of 3 \
             but odd; 10 is only even; 9 and 15 are only multiples of 3.",
        ),
        VennProblem::new(
            "A = vowels, B = letters of \"math\", C = the first five letters of the alphabet",
            ['a', 'e', 'i', 'm', 't', 'h', 'b', 'c', 'o', 'z']
                .into_iter()
                .map(Element::Sym)
                .collect(),
            BTreeMap::from([
                (Region::OnlyA, syms(&['i', 'o'])),
                (Region::OnlyB, syms(&['m', 't', 'h'])),
                (Region::OnlyC, syms(&['b', 'c'])),
                (Region::AC, syms(&['e'])),
                (Region::ABC, syms(&['a'])),
                (Region::Outside, syms(&['z'])),
            ]),
            "Only \"a\" is a vowel, appears in \"math\" and sits in a-e. \"e\" is a \
             vowel in a-e but not in \"math\". \"z\" belongs to none of the three \
             sets, so it stays outside the diagram.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn divisor_problem() -> VennProblem {
        standard_problems().remove(0)
    }

    /// Scripted full solve of the divisor problem
    fn solve_first_problem(game: &mut VennGame) {
        let moves: [(i64, Region); 10] = [
            (6, Region::ABC),
            (3, Region::BC),
            (2, Region::AB),
            (4, Region::AB),
            (8, Region::AB),
            (10, Region::OnlyA),
            (12, Region::AC),
            (18, Region::AC),
            (9, Region::OnlyC),
            (15, Region::OnlyC),
        ];
        for (n, region) in moves {
            assert_eq!(
                game.place(Element::Num(n), region, Origin::Available),
                PlaceOutcome::Moved
            );
        }
    }

    #[test]
    #[should_panic(expected = "at least one element")]
    fn test_empty_problem_is_rejected() {
        // An element-free problem would make accuracy 0/0 on check
        let _ = VennProblem::new("empty", Vec::new(), BTreeMap::new(), "");
    }

    #[test]
    fn test_region_ids_round_trip() {
        for region in Region::ALL {
            assert_eq!(Region::from_id(region.id()), Some(region));
        }
        assert_eq!(Region::from_id("onlyA"), Some(Region::OnlyA));
        assert_eq!(Region::from_id("inside"), None);
    }

    #[test]
    fn test_standard_problems_partition() {
        for problem in standard_problems() {
            let covered: usize = problem.solution.values().map(|s| s.len()).sum();
            assert_eq!(covered, problem.total_elements());
            for &e in &problem.elements {
                assert!(problem.solution_region(e).is_some());
            }
        }
    }

    #[test]
    fn test_full_solve_awards_max_points() {
        let mut game = VennGame::with_standard_problems();
        solve_first_problem(&mut game);
        assert!(game.placement().is_complete());

        let outcome = game.check_answer();
        let VennOutcome::Solved {
            points, advanced, ..
        } = outcome
        else {
            panic!("expected solve, got {:?}", outcome);
        };
        assert_eq!(points, 10);
        assert!(advanced);
        assert_eq!(game.score(), 10);
        assert_eq!(game.problem_index(), 1);
        // Fresh placement for the next problem
        assert!(!game.placement().is_complete());
    }

    #[test]
    fn test_incomplete_reports_without_scoring() {
        let mut game = VennGame::with_standard_problems();
        let _ = game.place(Element::Num(6), Region::ABC, Origin::Available);
        let outcome = game.check_answer();
        assert_eq!(outcome, VennOutcome::Incomplete { unplaced: 9 });
        assert_eq!(game.score(), 0);
        assert_eq!(game.problem_index(), 0);
    }

    #[test]
    fn test_partial_reports_accuracy_and_stays() {
        let mut game = VennGame::with_standard_problems();
        solve_first_problem(&mut game);
        // Swap 10 and 9 into each other's regions
        let _ = game.place(Element::Num(10), Region::OnlyC, Origin::Region(Region::OnlyA));
        let _ = game.place(Element::Num(9), Region::OnlyA, Origin::Region(Region::OnlyC));

        let outcome = game.check_answer();
        let VennOutcome::Partial { accuracy } = outcome else {
            panic!("expected partial, got {:?}", outcome);
        };
        assert!((accuracy - 80.0).abs() < 1e-9);
        assert_eq!(game.score(), 0);
        assert_eq!(game.problem_index(), 0);
    }

    #[test]
    fn test_duplicate_placement_is_noop() {
        let mut game = VennGame::with_standard_problems();
        assert_eq!(
            game.place(Element::Num(6), Region::ABC, Origin::Available),
            PlaceOutcome::Moved
        );
        assert_eq!(
            game.place(Element::Num(6), Region::ABC, Origin::Region(Region::ABC)),
            PlaceOutcome::AlreadyInRegion
        );
        assert_eq!(game.placement().region(Region::ABC).len(), 1);
    }

    #[test]
    fn test_unknown_element_is_noop() {
        let mut game = VennGame::with_standard_problems();
        assert_eq!(
            game.place(Element::Num(999), Region::AB, Origin::Available),
            PlaceOutcome::UnknownElement
        );
        assert_eq!(game.placement().total_elements(), 10);
    }

    #[test]
    fn test_moving_between_regions_preserves_coverage() {
        let mut game = VennGame::with_standard_problems();
        let _ = game.place(Element::Num(3), Region::AB, Origin::Available);
        assert_eq!(
            game.place(Element::Num(3), Region::BC, Origin::Region(Region::AB)),
            PlaceOutcome::Moved
        );
        assert!(game.placement().region(Region::AB).is_empty());
        assert!(game.placement().region(Region::BC).contains(&Element::Num(3)));
        assert_eq!(game.placement().total_elements(), 10);
    }

    #[test]
    fn test_game_completion_on_last_problem() {
        let mut game = VennGame::new(vec![divisor_problem()]);
        solve_first_problem(&mut game);
        let outcome = game.check_answer();
        assert!(matches!(
            outcome,
            VennOutcome::Solved {
                advanced: false,
                ..
            }
        ));
        assert!(game.is_complete());

        game.reset();
        assert_eq!(game.score(), 0);
        assert!(!game.is_complete());
        assert_eq!(game.placement().available().len(), 10);
    }

    proptest! {
        /// Random drop sequences never change the total element multiset
        #[test]
        fn placement_preserves_partition(moves in proptest::collection::vec((0usize..10, 0usize..8), 0..60)) {
            let problem = divisor_problem();
            let universe: BTreeSet<Element> = problem.elements.iter().copied().collect();
            let mut placement = Placement::new(&problem.elements);

            for (ei, ri) in moves {
                let element = problem.elements[ei];
                let target = Region::ALL[ri];
                let origin = match placement.locate(element) {
                    Some(r) => Origin::Region(r),
                    None => Origin::Available,
                };
                let _ = placement.place(element, target, origin);

                // Every element in exactly one place
                prop_assert_eq!(placement.total_elements(), universe.len());
                let mut seen: BTreeSet<Element> = placement.available().clone();
                for region in Region::ALL {
                    for e in placement.region(region) {
                        prop_assert!(seen.insert(*e));
                    }
                }
                prop_assert_eq!(seen, universe.clone());
            }
        }
    }
}
