use ultraviolet::DVec3;

/// Lazy iterator over the nominal sites of a simple-cubic lattice.
///
/// Each axis starts at `spacing / 2` and advances by repeated addition of
/// `spacing` while the coordinate stays strictly below `extent`. Sites come
/// out in (x, y, z) order with z varying fastest. The number of sites depends
/// only on `extent` and `spacing`, and is zero whenever `spacing >= extent`.
#[derive(Clone, Debug)]
pub struct LatticeWalker {
    spacing: f64,
    extent: f64,
    start: f64,
    next: Option<DVec3>,
}

impl LatticeWalker {
    pub fn new(extent: f64, spacing: f64) -> Self {
        let start = spacing / 2.0;
        // A cell as wide as the cube holds no site; a non-positive or NaN
        // spacing would never leave the first axis.
        let next = if spacing > 0.0 && spacing < extent {
            Some(DVec3::new(start, start, start))
        } else {
            None
        };
        Self {
            spacing,
            extent,
            start,
            next,
        }
    }

    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn extent(&self) -> f64 {
        self.extent
    }

    /// Sites visited along one axis.
    pub fn axis_steps(&self) -> usize {
        if !(self.spacing > 0.0 && self.spacing < self.extent) {
            return 0;
        }
        let mut steps = 0;
        let mut coord = self.start;
        while coord < self.extent {
            steps += 1;
            coord += self.spacing;
        }
        steps
    }

    /// Total number of sites the full walk produces.
    pub fn site_count(&self) -> usize {
        self.axis_steps().pow(3)
    }

    fn advance(&self, site: DVec3) -> Option<DVec3> {
        let z = site.z + self.spacing;
        if z < self.extent {
            return Some(DVec3::new(site.x, site.y, z));
        }
        let y = site.y + self.spacing;
        if y < self.extent {
            return Some(DVec3::new(site.x, y, self.start));
        }
        let x = site.x + self.spacing;
        if x < self.extent {
            return Some(DVec3::new(x, self.start, self.start));
        }
        None
    }
}

impl Iterator for LatticeWalker {
    type Item = DVec3;

    fn next(&mut self) -> Option<DVec3> {
        let current = self.next?;
        self.next = self.advance(current);
        Some(current)
    }
}

/// Fresh walk over the lattice spanning `[0, cube_dim)` on every axis.
pub fn walk_lattice(cube_dim: f64, spacing: f64) -> LatticeWalker {
    LatticeWalker::new(cube_dim, spacing)
}
