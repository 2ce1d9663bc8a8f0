//! Deterministic blockie avatars.
//!
//! Accounts without a resolvable profile image get a small mirrored pixel
//! pattern derived from their address. The generator reproduces the
//! `blockies` algorithm bit for bit, so the same address renders the same
//! pattern here as in browser wallets.

use std::fmt::Write as _;

use crate::profile::ResolvedProfile;

/// Seed used when no address is available.
pub const FALLBACK_SEED: &str = "0x000000";

/// Grid size used for account avatars.
pub const DEFAULT_SIZE: usize = 9;

/// Default foreground color.
pub const DEFAULT_COLOR: &str = "#357dc0";

/// Default background color.
pub const DEFAULT_BG_COLOR: &str = "#afe0f5";

/// Default spot color.
pub const DEFAULT_SPOT_COLOR: &str = "#254a87";

/// Color of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Background.
    Background,
    /// Foreground color.
    Foreground,
    /// Spot color.
    Spot,
}

impl Cell {
    const fn from_sample(sample: u32) -> Self {
        match sample {
            0 => Self::Background,
            1 => Self::Foreground,
            _ => Self::Spot,
        }
    }
}

/// Generation options. `None` colors are drawn from the seeded generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdenticonOptions {
    /// Cells per side.
    pub size: usize,
    /// Foreground color.
    pub color: Option<String>,
    /// Background color.
    pub bg_color: Option<String>,
    /// Spot color.
    pub spot_color: Option<String>,
}

impl Default for IdenticonOptions {
    fn default() -> Self {
        Self {
            size: DEFAULT_SIZE,
            color: Some(DEFAULT_COLOR.to_owned()),
            bg_color: Some(DEFAULT_BG_COLOR.to_owned()),
            spot_color: Some(DEFAULT_SPOT_COLOR.to_owned()),
        }
    }
}

impl IdenticonOptions {
    /// Options with all colors derived from the seed.
    #[must_use]
    pub const fn random_colors(size: usize) -> Self {
        Self {
            size,
            color: None,
            bg_color: None,
            spot_color: None,
        }
    }
}

/// Xorshift generator over four wrapping 32-bit words.
#[derive(Debug, Clone)]
struct SeededRandom([i32; 4]);

impl SeededRandom {
    fn new(seed: &str) -> Self {
        let mut state = [0i32; 4];
        for (i, unit) in seed.encode_utf16().enumerate() {
            let s = state[i % 4];
            state[i % 4] = (s << 5).wrapping_sub(s).wrapping_add(i32::from(unit));
        }
        Self(state)
    }

    /// Returns a value in `[0, 2)`.
    #[allow(clippy::cast_sign_loss)]
    fn next(&mut self) -> f64 {
        let [a, b, c, d] = self.0;
        let t = a ^ (a << 11);
        let next = d ^ (d >> 19) ^ t ^ (t >> 8);
        self.0 = [b, c, d, next];
        f64::from(next as u32) / 2_147_483_648.0
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn color(&mut self) -> String {
        let h = (self.next() * 360.0).floor() as u32;
        let s = self.next().mul_add(60.0, 40.0);
        let l = (self.next() + self.next() + self.next() + self.next()) * 25.0;
        format!("hsl({h},{s}%,{l}%)")
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn sample(&mut self) -> u32 {
        (self.next() * 2.3).floor() as u32
    }
}

/// A generated blockie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identicon {
    size: usize,
    cells: Vec<Cell>,
    color: String,
    bg_color: String,
    spot_color: String,
}

impl Identicon {
    /// Generates the default account avatar for `seed`.
    #[must_use]
    pub fn new(seed: &str) -> Self {
        Self::with_options(seed, &IdenticonOptions::default())
    }

    /// Generates a blockie with explicit options.
    ///
    /// An empty seed is replaced by [`FALLBACK_SEED`].
    #[must_use]
    pub fn with_options(seed: &str, options: &IdenticonOptions) -> Self {
        let seed = if seed.is_empty() { FALLBACK_SEED } else { seed };
        let mut rng = SeededRandom::new(seed);
        let color = options.color.clone().unwrap_or_else(|| rng.color());
        let bg_color = options.bg_color.clone().unwrap_or_else(|| rng.color());
        let spot_color = options.spot_color.clone().unwrap_or_else(|| rng.color());

        let size = options.size.max(1);
        let data_width = size.div_ceil(2);
        let mirror_width = size - data_width;
        let mut cells = Vec::with_capacity(size * size);
        for _ in 0..size {
            let row: Vec<Cell> = (0..data_width)
                .map(|_| Cell::from_sample(rng.sample()))
                .collect();
            cells.extend_from_slice(&row);
            cells.extend(row[..mirror_width].iter().rev());
        }

        Self {
            size,
            cells,
            color,
            bg_color,
            spot_color,
        }
    }

    /// Cells per side.
    #[must_use]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Returns the cell at `(row, col)`.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<Cell> {
        (row < self.size && col < self.size).then(|| self.cells[row * self.size + col])
    }

    /// Returns all cells in row-major order.
    #[must_use]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Returns the CSS color for a cell kind.
    #[must_use]
    pub fn color_of(&self, cell: Cell) -> &str {
        match cell {
            Cell::Background => &self.bg_color,
            Cell::Foreground => &self.color,
            Cell::Spot => &self.spot_color,
        }
    }

    /// Renders the blockie as an SVG document, `scale` pixels per cell.
    #[must_use]
    pub fn to_svg(&self, scale: usize) -> String {
        let scale = scale.max(1);
        let px = self.size * scale;
        let mut svg = format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="{px}" height="{px}" viewBox="0 0 {px} {px}" shape-rendering="crispEdges">"#
        );
        let _ = write!(
            svg,
            r#"<rect width="{px}" height="{px}" fill="{}"/>"#,
            self.bg_color
        );
        for (i, cell) in self.cells.iter().enumerate() {
            if *cell == Cell::Background {
                continue;
            }
            let x = (i % self.size) * scale;
            let y = (i / self.size) * scale;
            let _ = write!(
                svg,
                r#"<rect x="{x}" y="{y}" width="{scale}" height="{scale}" fill="{}"/>"#,
                self.color_of(*cell)
            );
        }
        svg.push_str("</svg>");
        svg
    }
}

/// What to show for an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Avatar {
    /// A fetchable image URL.
    Image(String),
    /// Generated fallback.
    Identicon(Identicon),
}

impl Avatar {
    /// Picks the avatar for `address`: the resolved profile image if there is
    /// one, else `fallback_image` (e.g., an ENS avatar), else a blockie.
    #[must_use]
    pub fn choose(address: &str, profile: Option<&ResolvedProfile>, fallback_image: Option<&str>) -> Self {
        profile
            .and_then(|p| p.avatar_url.as_deref())
            .or(fallback_image)
            .filter(|url| !url.is_empty())
            .map_or_else(
                || Self::Identicon(Identicon::new(address)),
                |url| Self::Image(url.to_owned()),
            )
    }
}
