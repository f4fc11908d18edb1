use crate::formula::magic_constant;
use crate::square::MagicSquare;
use std::fmt;

const PADDING: usize = 4;
const DEFAULT_WIDTH: usize = 90;

/// A bunch of squares. This type exists solely for its `Display` method, which prints them side by
/// side when they fit in the terminal.
pub struct SquareSet<'a>(pub Vec<&'a MagicSquare>);

impl<'a> fmt::Display for SquareSet<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let width = termsize::get()
            .map(|size| size.cols as usize)
            .unwrap_or(DEFAULT_WIDTH);
        let blocks = self.0.iter().map(|sq| sq.to_string()).collect::<Vec<_>>();
        for (i, band) in bands(&blocks, width).iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for line in band {
                writeln!(f, "{}", line)?;
            }
        }
        Ok(())
    }
}

fn block_width(block: &str) -> usize {
    block.lines().map(|l| l.chars().count()).max().unwrap_or(0)
}

/// Group the text blocks greedily into bands no wider than `max_width`, and lay out each band's
/// blocks side by side. A block wider than `max_width` gets a band of its own.
fn bands(blocks: &[String], max_width: usize) -> Vec<Vec<String>> {
    let mut bands = Vec::new();
    let mut band: Vec<&str> = Vec::new();
    let mut band_width = 0;
    for block in blocks {
        let width = PADDING + block_width(block);
        if !band.is_empty() && band_width + width > max_width {
            bands.push(side_by_side(&band));
            band.clear();
            band_width = 0;
        }
        band.push(block);
        band_width += width;
    }
    if !band.is_empty() {
        bands.push(side_by_side(&band));
    }
    bands
}

fn side_by_side(blocks: &[&str]) -> Vec<String> {
    let height = blocks.iter().map(|b| b.lines().count()).max().unwrap_or(0);
    (0..height)
        .map(|row| {
            let mut line = String::new();
            for block in blocks {
                let text = block.lines().nth(row).unwrap_or("");
                line.push_str(&format!(
                    "{:pad$}{:<width$}",
                    "",
                    text,
                    pad = PADDING,
                    width = block_width(block)
                ));
            }
            line.trim_end().to_owned()
        })
        .collect()
}

/************************
 *     Walkthrough      *
 ************************/

/// One worked example of the formula.
#[derive(Debug, Clone, PartialEq)]
pub struct UsageExample {
    pub title: &'static str,
    pub n: u32,
    pub d: u32,
    pub a: f64,
    /// A hand-checkable fact about the result, if there's a neat one.
    pub note: Option<&'static str>,
}

pub fn usage_examples() -> Vec<UsageExample> {
    vec![
        UsageExample {
            title: "Classical 3x3 magic square",
            n: 3,
            d: 2,
            a: 1.0,
            note: Some("Known value: 8+1+6 = 15"),
        },
        UsageExample {
            title: "3x3 square starting at 100",
            n: 3,
            d: 2,
            a: 100.0,
            note: Some("Square: [107,100,105], [102,104,106], [103,108,101]"),
        },
        UsageExample {
            title: "5x5x5 magic cube starting at 500.5",
            n: 5,
            d: 3,
            a: 500.5,
            note: None,
        },
        UsageExample {
            title: "4x4 square starting at 50",
            n: 4,
            d: 2,
            a: 50.0,
            note: None,
        },
    ]
}

/// The usage examples, evaluated. Exists for its `Display` method.
pub struct Walkthrough;

impl fmt::Display for Walkthrough {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let rule = "=".repeat(50);
        writeln!(f, "Generalized magic constant - usage examples")?;
        writeln!(f, "{}", rule)?;
        for (i, example) in usage_examples().iter().enumerate() {
            let result = magic_constant(example.n, example.d, example.a);
            writeln!(f)?;
            writeln!(f, "{}. {}:", i + 1, example.title)?;
            writeln!(
                f,
                "   S({},{},{}) = {}",
                example.n, example.d, example.a, result
            )?;
            if let Some(note) = example.note {
                writeln!(f, "   {}", note)?;
            }
        }
        writeln!(f)?;
        writeln!(f, "{}", rule)?;
        writeln!(f, "Formula: S(n,d,a) = n·a + n(n^d - 1)/2")?;
        writeln!(f, "{}", rule)
    }
}

#[test]
fn test_bands_side_by_side() {
    let blocks = vec!["1 2\n3 4\n".to_owned(), "5 6\n7 8\n".to_owned()];
    assert_eq!(
        bands(&blocks, 40),
        vec![vec!["    1 2    5 6", "    3 4    7 8"]]
    );
}

#[test]
fn test_bands_wrap() {
    let blocks = vec![
        "1 2\n3 4\n".to_owned(),
        "5 6\n7 8\n".to_owned(),
        "9\n".to_owned(),
    ];
    assert_eq!(
        bands(&blocks, 12),
        vec![vec!["    1 2", "    3 4"], vec!["    5 6    9", "    7 8"]]
    );
}

#[test]
fn test_square_set_lists_every_square() {
    let a = MagicSquare::siamese(3, 1.0).unwrap();
    let b = MagicSquare::siamese(5, 1.0).unwrap();
    let text = SquareSet(vec![&a, &b]).to_string();
    assert!(text.contains("8 1 6"));
    assert!(text.contains("17 24  1  8 15"));
}

#[test]
fn test_walkthrough() {
    let text = Walkthrough.to_string();
    assert!(text.contains("S(3,2,1) = 15\n"));
    assert!(text.contains("S(3,2,100) = 312\n"));
    assert!(text.contains("S(5,3,500.5) = 2812.5\n"));
    assert!(text.contains("S(4,2,50) = 230\n"));
}
