use super::{Node, Occupancy};

/// Ray offsets covering an agent footprint that spills one cell right and down.
const FOOTPRINT_OFFSETS: [(i32, i32); 4] = [(0, 0), (1, 0), (0, 1), (1, 1)];

impl Occupancy {
    /// Footprint-aware visibility between the centers of `from` and `to`.
    ///
    /// The segment is walked four times, shifted by +1 in x, in y and in both,
    /// and every walk must stay on walkable cells. Endpoints on the last row or
    /// column have no room for the shifted rays and are never visible.
    pub fn line_of_sight(&self, from: Node, to: Node) -> bool {
        if !self.has_footprint_room(from) || !self.has_footprint_room(to) {
            return false;
        }

        FOOTPRINT_OFFSETS
            .iter()
            .all(|&(dx, dy)| self.ray_clear(from.offset(dx, dy), to.offset(dx, dy)))
    }

    fn has_footprint_room(&self, node: Node) -> bool {
        node.x >= 0
            && node.y >= 0
            && (node.x as usize) + 1 < self.width()
            && (node.y as usize) + 1 < self.height()
    }

    /// Integer walk over every cell the center-to-center segment passes through.
    ///
    /// At each step the walk compares where the segment next crosses a column
    /// boundary against where it next crosses a row boundary and enters the
    /// nearer cell. A tie means the segment passes exactly through a cell
    /// corner; both cells sharing that corner must then be walkable.
    fn ray_clear(&self, from: Node, to: Node) -> bool {
        if self.is_obstacle(from.x, from.y) {
            return false;
        }

        let nx = (to.x - from.x).abs() as i64;
        let ny = (to.y - from.y).abs() as i64;
        let step_x = (to.x - from.x).signum();
        let step_y = (to.y - from.y).signum();

        let (mut x, mut y) = (from.x, from.y);
        let (mut ix, mut iy) = (0i64, 0i64);

        while ix < nx || iy < ny {
            let decision = (1 + 2 * ix) * ny - (1 + 2 * iy) * nx;
            if decision == 0 {
                if self.is_obstacle(x + step_x, y) || self.is_obstacle(x, y + step_y) {
                    return false;
                }
                x += step_x;
                y += step_y;
                ix += 1;
                iy += 1;
            } else if decision < 0 {
                x += step_x;
                ix += 1;
            } else {
                y += step_y;
                iy += 1;
            }

            if self.is_obstacle(x, y) {
                return false;
            }
        }

        true
    }
}
