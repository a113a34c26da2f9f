use slamsim_common::WorldView;

/// Renderer-agnostic interface. All renderers implement this trait.
///
/// The renderer reads an owned world snapshot and produces output. It never
/// sees the live world, so it cannot mutate it.
pub trait Renderer {
    /// The output type produced by this renderer.
    type Output;

    /// Render one frame from the given snapshot.
    fn render(&self, view: &WorldView) -> Self::Output;
}

/// Text grid renderer for terminals, logs and tests.
///
/// Draws the world as a square character grid with `+y` pointing up:
/// `o` is the robot, `x` a landmark, `.` empty space. The robot is drawn
/// over a landmark sharing its cell.
#[derive(Debug, Clone)]
pub struct TextGridRenderer {
    /// Upper bound on grid cells per side; larger worlds are scaled down.
    pub max_cells: usize,
    /// Append one line per landmark below the grid.
    pub list_landmarks: bool,
}

impl Default for TextGridRenderer {
    fn default() -> Self {
        Self {
            max_cells: 50,
            list_landmarks: true,
        }
    }
}

impl TextGridRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cells per side for a world of the given size.
    pub fn cells_for(&self, world_size: f64) -> usize {
        (world_size.ceil() as usize).clamp(1, self.max_cells.max(1))
    }

    fn cell_of(value: f64, scale: f64, cells: usize) -> usize {
        ((value / scale).floor().max(0.0) as usize).min(cells - 1)
    }
}

impl Renderer for TextGridRenderer {
    type Output = String;

    fn render(&self, view: &WorldView) -> String {
        let cells = self.cells_for(view.world_size);
        let scale = view.world_size / cells as f64;
        let mut grid = vec![vec!['.'; cells]; cells];

        for [x, y] in &view.landmarks {
            let (col, row) = (
                Self::cell_of(*x, scale, cells),
                Self::cell_of(*y, scale, cells),
            );
            grid[row][col] = 'x';
        }
        let [rx, ry] = view.position;
        grid[Self::cell_of(ry, scale, cells)][Self::cell_of(rx, scale, cells)] = 'o';

        let mut out = String::new();
        out.push_str(&format!(
            "=== World (size={:.1}, landmarks={}, cells={}) ===\n",
            view.world_size,
            view.landmarks.len(),
            cells
        ));
        out.push_str(&view.describe());
        out.push('\n');
        for row in grid.iter().rev() {
            out.extend(row.iter());
            out.push('\n');
        }
        if self.list_landmarks {
            for (i, [x, y]) in view.landmarks.iter().enumerate() {
                out.push_str(&format!("  [{i}] ({x:.0}, {y:.0})\n"));
            }
        }

        tracing::trace!(cells, bytes = out.len(), "rendered text grid");
        out
    }
}
