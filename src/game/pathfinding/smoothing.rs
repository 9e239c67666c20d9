use crate::game::grid::{Node, Occupancy};

/// Any-angle post-process ("string pulling").
///
/// Walking back from the goal, each waypoint looks for the earliest waypoint it
/// can see directly; everything strictly between the two is dropped. Endpoints
/// are never removed. Worst case O(k²) visibility checks for a path of k cells.
pub fn smooth_path(occupancy: &Occupancy, mut path: Vec<Node>) -> Vec<Node> {
    if path.len() < 3 {
        return path;
    }

    let mut i = path.len() - 1;
    while i > 0 {
        let mut j = 0;
        while j + 1 < i {
            if occupancy.line_of_sight(path[i], path[j]) {
                path.drain(j + 1..i);
                i = j + 1;
                break;
            }
            j += 1;
        }
        i -= 1;
    }

    path
}
