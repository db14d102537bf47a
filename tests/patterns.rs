use life_term::{draw::App, load, Field};
use std::time::Duration;

fn grid(text: &str, height: usize, width: usize) -> Field {
    load::parse_grid(text, height, width).unwrap()
}

#[test]
fn blinker_oscillates_without_settling() {
    let mut field = grid(".....\n.....\n.###.\n", 5, 5);
    let start = field.clone();

    assert_ne!(field.step(), 0);
    assert_eq!(field.to_string(), ".....\n..#..\n..#..\n..#..\n.....");
    assert_ne!(field.step(), 0);
    assert_eq!(field, start);
}

#[test]
fn glider_next_to_block_advances_as_whole() {
    // Glider at the top left, block near the bottom right; the staged step
    // must compute both from the same generation.
    let mut field = grid(
        concat!(
            ".#......\n",
            "..#.....\n",
            "###.....\n",
            "........\n",
            "........\n",
            ".....##.\n",
            ".....##.\n",
        ),
        8,
        8,
    );

    field.step();

    assert_eq!(
        field.snapshot(),
        vec![
            "........",
            "#.#.....",
            ".##.....",
            ".#......",
            "........",
            ".....##.",
            ".....##.",
            "........",
        ]
    );
}

#[test]
fn glider_dies_into_corner_block() {
    // A glider heading down-right on a bounded field ends as a still life
    // against the far corner instead of wrapping around.
    let field = grid(".#....\n..#...\n###...\n", 6, 6);
    let mut a = App::new(field, Duration::ZERO, Some(200));
    let summary = a.run_headless(&mut Vec::new()).unwrap();

    assert!(summary.settled);
    assert_eq!(summary.generations, 15);
    assert_eq!(summary.population, 4);
    assert_eq!(
        a.field().snapshot(),
        vec!["......", "......", "......", "......", "....##", "....##"]
    );
}

#[test]
fn border_cells_count_fewer_neighbors() {
    let mut field = grid("#..#\n....\n....\n#..#\n", 4, 4);
    assert_eq!(field.step(), 4);
    assert_eq!(field.population(), 0);
}

#[test]
fn headless_output_is_the_final_grid() {
    let field = grid("##\n##\n", 3, 4);
    let mut a = App::new(field, Duration::ZERO, None);
    let mut out = Vec::new();
    a.run_headless(&mut out).unwrap();

    assert_eq!(String::from_utf8(out).unwrap(), "##..\r\n##..\r\n....\r\n");
}
