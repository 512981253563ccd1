use std::collections::HashSet;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use clap::{Parser, ValueHint};
use log::{debug, info};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64;

/// Run Game of Life boards at a sweep of initial densities and write how
/// many generations each one takes to settle.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Table to write (input format of `density-plot`)
    #[arg(short, long, default_value = "Life/data.txt", value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Board width in cells
    #[arg(long, default_value_t = 50)]
    width: usize,

    /// Board height in cells
    #[arg(long, default_value_t = 50)]
    height: usize,

    /// Number of densities, evenly spaced in (0, 1)
    #[arg(long, default_value_t = 19)]
    steps: u32,

    /// Stop a run that has not settled after this many generations
    #[arg(long, default_value_t = 1000)]
    max_generations: u32,

    #[arg(long, default_value_t = 42)]
    seed: u64,
}

// ---------------------------------------------------------------------------
// Board – toroidal Life grid
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
struct Board {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Board {
    fn empty(width: usize, height: usize) -> Self {
        Board {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Each cell is alive with probability `density`.
    fn random(width: usize, height: usize, density: f64, rng: &mut impl Rng) -> Self {
        let cells = (0..width * height).map(|_| rng.gen_bool(density)).collect();
        Board {
            width,
            height,
            cells,
        }
    }

    fn set(&mut self, x: usize, y: usize, alive: bool) {
        self.cells[y * self.width + x] = alive;
    }

    fn is_alive(&self, x: usize, y: usize) -> bool {
        self.cells[y * self.width + x]
    }

    /// Live cells among the eight neighbours; edges wrap around.
    fn live_neighbors(&self, x: usize, y: usize) -> usize {
        let (w, h) = (self.width, self.height);
        let mut n = 0;
        for dy in [h - 1, 0, 1] {
            for dx in [w - 1, 0, 1] {
                if dx == 0 && dy == 0 {
                    continue;
                }
                if self.is_alive((x + dx) % w, (y + dy) % h) {
                    n += 1;
                }
            }
        }
        n
    }

    fn step(&self) -> Board {
        let mut next = Board::empty(self.width, self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let n = self.live_neighbors(x, y);
                let alive = if self.is_alive(x, y) {
                    n == 2 || n == 3
                } else {
                    n == 3
                };
                next.set(x, y, alive);
            }
        }
        next
    }
}

/// Last generation that produced a configuration not seen before.
///
/// Still lifes and dead boards settle at 0; a board that is still changing
/// after `max` generations reports `max`.
fn generations_until_stable(mut board: Board, max: u32) -> u32 {
    let mut seen = HashSet::new();
    for generation in 0..=max {
        if !seen.insert(board.cells.clone()) {
            return generation - 1;
        }
        board = board.step();
    }
    max
}

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// `0.05` → `0,05`, the decimal-comma style the plotter accepts.
fn format_density(density: f64) -> String {
    format!("{density:.2}").replace('.', ",")
}

fn write_table(out: &mut impl Write, rows: &[(f64, u32)]) -> std::io::Result<()> {
    writeln!(out, "density generation")?;
    for &(density, generation) in rows {
        writeln!(out, "{} {generation}", format_density(density))?;
    }
    Ok(())
}

fn run(args: &Args) -> Result<Vec<(f64, u32)>> {
    ensure!(
        args.width >= 3 && args.height >= 3,
        "board must be at least 3x3, got {}x{}",
        args.width,
        args.height
    );
    ensure!(args.steps > 0, "need at least one density step");

    let mut rng = Pcg64::seed_from_u64(args.seed);
    let rows = (1..=args.steps)
        .map(|i| {
            let density = i as f64 / (args.steps + 1) as f64;
            let board = Board::random(args.width, args.height, density, &mut rng);
            let generations = generations_until_stable(board, args.max_generations);
            debug!("density {density:.2}: settled after {generations} generations");
            (density, generations)
        })
        .collect();
    Ok(rows)
}

fn write_file(path: &Path, rows: &[(f64, u32)]) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    write_table(&mut writer, rows).with_context(|| format!("writing {}", path.display()))?;
    writer.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let rows = run(&args)?;
    write_file(&args.output, &rows)?;

    info!(
        "wrote {} densities ({}x{} board) to {}",
        rows.len(),
        args.width,
        args.height,
        args.output.display()
    );
    Ok(())
}
