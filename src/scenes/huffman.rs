//! Huffman coding, animated.
//!
//! One leaf per distinct symbol fades in from left to right. Then the two
//! lightest trees are repeatedly merged: both sink one level, a parent node
//! carrying the summed frequency fades in above them, and the `0`/`1` edges
//! are drawn down to the children.

use log::debug;

use crate::engine::{ObjectId, PointField, Scene, SceneError};
use crate::renderer::assets::{Assets, FontDef, Shape, TextureDef};
use crate::types::{Font, Point, Rgb, Rgba, TextAlign, Texture};

pub const WIDTH: i32 = 1280;
pub const HEIGHT: i32 = 720;
const BACKGROUND: Rgba = Rgba::new(32, 32, 32, 0xFF);
const NODE_COLOR: Rgb = Rgb {
    r: 0x3C,
    g: 0x64,
    b: 0xA0,
};
const EDGE_COLOR: Rgba = Rgba::new(0xC8, 0xC8, 0xC8, 0xFF);

/// Y of every tree root; each merge pushes the subtrees one level down.
const ROOT_Y: i32 = 100;
const LEVEL: Point = Point::new(0, 100);
const COUNT_BELOW: Point = Point::new(0, 70);
const LABEL_OFFSET: i32 = 24;

const LEAF_STAGGER: usize = 10;
const LEAF_FADE: usize = 30;
const SINK: usize = 30;
const PARENT_FADE: usize = 60;
const EDGE_DELAY: usize = 45;
const EDGE_DRAW: usize = 60;
const LABEL_FADE: usize = 15;
const MERGE: usize = SINK + EDGE_DELAY + EDGE_DRAW + LABEL_FADE;
const HOLD: usize = 60;

struct Kit {
    circle: Texture,
    font: Font,
}

enum CodeTree {
    Leaf {
        freq: usize,
        circle: ObjectId,
        symbol: ObjectId,
        count: ObjectId,
    },
    Node {
        freq: usize,
        circle: ObjectId,
        count: ObjectId,
        edges: [ObjectId; 2],
        labels: [ObjectId; 2],
        children: Box<[CodeTree; 2]>,
    },
}

impl CodeTree {
    fn freq(&self) -> usize {
        match self {
            CodeTree::Leaf { freq, .. } | CodeTree::Node { freq, .. } => *freq,
        }
    }

    /// Horizontal position of the node's circle.
    fn center_x(&self, scene: &Scene) -> i32 {
        match self {
            CodeTree::Leaf { circle, .. } | CodeTree::Node { circle, .. } => {
                scene.object(*circle).anchor().x
            }
        }
    }

    /// Every point owned by this node, excluding its subtrees.
    fn points(&self) -> Vec<(ObjectId, PointField)> {
        match self {
            CodeTree::Leaf {
                circle,
                symbol,
                count,
                ..
            } => vec![
                (*circle, PointField::Origin),
                (*symbol, PointField::Anchor),
                (*count, PointField::Anchor),
            ],
            CodeTree::Node {
                circle,
                count,
                edges,
                labels,
                ..
            } => {
                let mut points = vec![(*circle, PointField::Origin), (*count, PointField::Anchor)];
                for (&edge, &label) in edges.iter().zip(labels) {
                    points.push((edge, PointField::Start));
                    points.push((edge, PointField::End));
                    points.push((label, PointField::Anchor));
                }
                points
            }
        }
    }

    fn children(&self) -> &[CodeTree] {
        match self {
            CodeTree::Leaf { .. } => &[],
            CodeTree::Node { children, .. } => &children[..],
        }
    }
}

/// Distinct symbols with their counts, least frequent first; ties keep the
/// order of first appearance.
pub fn frequencies(text: &str) -> Vec<(char, usize)> {
    let mut counts: Vec<(char, usize)> = Vec::new();
    for ch in text.chars() {
        match counts.iter_mut().find(|(c, _)| *c == ch) {
            Some((_, n)) => *n += 1,
            None => counts.push((ch, 1)),
        }
    }
    counts.sort_by_key(|&(_, n)| n);
    counts
}

/// Build the animation for `text` along with the assets it draws with.
pub fn build(text: &str) -> Result<(Scene, Assets), SceneError> {
    let mut assets = Assets::new();
    let kit = Kit {
        circle: assets.add_texture(TextureDef {
            name: "circle".into(),
            width: 64,
            height: 64,
            shape: Shape::Ellipse,
            color: NODE_COLOR,
        }),
        font: assets.add_font(FontDef {
            name: "oswald".into(),
            size: 36,
        }),
    };
    let mut scene = Scene::new(WIDTH, HEIGHT, BACKGROUND);

    let symbols = frequencies(text);
    let spacing = WIDTH / (symbols.len() as i32 + 1);
    let mut forest = Vec::with_capacity(symbols.len());
    for (i, &(symbol, freq)) in symbols.iter().enumerate() {
        let center = Point::new(spacing * (i as i32 + 1), ROOT_Y);
        forest.push(make_leaf(&mut scene, &kit, symbol, freq, center, i * LEAF_STAGGER)?);
    }

    let mut begin = symbols.len().saturating_sub(1) * LEAF_STAGGER + LEAF_FADE;
    while forest.len() > 1 {
        let left = take_lightest(&mut forest);
        let right = take_lightest(&mut forest);
        forest.push(combine(&mut scene, &kit, left, right, begin)?);
        begin += MERGE;
    }

    let length = scene.length_in_frames();
    scene.extend_to(length + HOLD);
    debug!(
        "huffman scene: {} symbols, {} frames",
        symbols.len(),
        scene.length_in_frames()
    );
    Ok((scene, assets))
}

fn glyph(symbol: char) -> String {
    match symbol {
        ' ' => "_".into(),
        c => c.to_string(),
    }
}

fn make_leaf(
    scene: &mut Scene,
    kit: &Kit,
    symbol: char,
    freq: usize,
    center: Point,
    begin: usize,
) -> Result<CodeTree, SceneError> {
    let circle = scene.fade_in_image(&kit.circle, center, 1, begin, LEAF_FADE)?;
    let symbol = scene.fade_in_text(
        &kit.font,
        glyph(symbol),
        Rgba::WHITE,
        center,
        TextAlign::Center,
        2,
        begin,
        LEAF_FADE,
    )?;
    let count = scene.fade_in_text(
        &kit.font,
        freq.to_string(),
        Rgba::WHITE,
        center + COUNT_BELOW,
        TextAlign::Center,
        2,
        begin,
        LEAF_FADE,
    )?;
    Ok(CodeTree::Leaf {
        freq,
        circle,
        symbol,
        count,
    })
}

/// Remove the lightest tree; the oldest one wins ties.
fn take_lightest(forest: &mut Vec<CodeTree>) -> CodeTree {
    let index = forest
        .iter()
        .enumerate()
        .min_by_key(|(_, tree)| tree.freq())
        .map_or(0, |(i, _)| i);
    forest.remove(index)
}

fn move_tree(
    scene: &mut Scene,
    tree: &CodeTree,
    offset: Point,
    begin: usize,
    length: usize,
) -> Result<(), SceneError> {
    for (id, field) in tree.points() {
        scene.add_move(id, field, offset, true, begin, length)?;
    }
    for child in tree.children() {
        move_tree(scene, child, offset, begin, length)?;
    }
    Ok(())
}

fn combine(
    scene: &mut Scene,
    kit: &Kit,
    left: CodeTree,
    right: CodeTree,
    begin: usize,
) -> Result<CodeTree, SceneError> {
    move_tree(scene, &left, LEVEL, begin, SINK)?;
    move_tree(scene, &right, LEVEL, begin, SINK)?;
    let begin = begin + SINK;

    let (xl, xr) = (left.center_x(scene), right.center_x(scene));
    let center = Point::new((xl + xr) / 2, ROOT_Y);
    let freq = left.freq() + right.freq();
    let circle = scene.fade_in_image(&kit.circle, center, 1, begin, PARENT_FADE)?;
    let count = scene.fade_in_text(
        &kit.font,
        freq.to_string(),
        Rgba::WHITE,
        center,
        TextAlign::Center,
        2,
        begin,
        PARENT_FADE,
    )?;

    let begin = begin + EDGE_DELAY;
    let child = |x: i32| Point::new(x, ROOT_Y) + LEVEL;
    let edges = [
        scene.draw_line(EDGE_COLOR, center, child(xl), 0, begin, EDGE_DRAW)?,
        scene.draw_line(EDGE_COLOR, center, child(xr), 0, begin, EDGE_DRAW)?,
    ];

    let drawn = begin + EDGE_DRAW;
    let labels = [
        edge_label(scene, kit, edges[0], "0", Point::new(-LABEL_OFFSET, 0), drawn)?,
        edge_label(scene, kit, edges[1], "1", Point::new(LABEL_OFFSET, 0), drawn)?,
    ];

    Ok(CodeTree::Node {
        freq,
        circle,
        count,
        edges,
        labels,
        children: Box::new([left, right]),
    })
}

/// A bit label that snaps beside the finished edge and then fades in.
fn edge_label(
    scene: &mut Scene,
    kit: &Kit,
    edge: ObjectId,
    bit: &str,
    offset: Point,
    begin: usize,
) -> Result<ObjectId, SceneError> {
    let label = scene.fade_in_text(
        &kit.font,
        bit,
        Rgba::WHITE,
        Point::default(),
        TextAlign::Center,
        2,
        begin,
        LABEL_FADE,
    )?;
    scene.add_colocate(edge, label, offset, begin)?;
    Ok(label)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::objects::ObjectKind;

    fn play_through(scene: &mut Scene) {
        scene.finalize();
        for t in 0..scene.length_in_frames() {
            scene.tick(t);
        }
    }

    fn texts(scene: &Scene) -> Vec<(String, Point)> {
        scene
            .objects()
            .iter()
            .filter_map(|(_, object)| match &object.kind {
                ObjectKind::Text(text) => Some((text.content.clone(), text.anchor)),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn frequencies_are_ascending_and_stable() {
        assert_eq!(
            frequencies("abracadabra"),
            vec![('c', 1), ('d', 1), ('b', 2), ('r', 2), ('a', 5)]
        );
        assert!(frequencies("").is_empty());
    }

    #[test]
    fn builds_without_conflicts() {
        let (scene, assets) = build("abracadabra").unwrap();
        // 5 leaves of 3 objects, 4 merges of 6 objects.
        assert_eq!(scene.objects().len(), 5 * 3 + 4 * 6);
        assert_eq!(scene.length_in_frames(), 40 + LEAF_FADE + 4 * MERGE + HOLD);
        assert!(assets.texture_named("circle").is_some());
        assert!(assets.font_named("oswald").is_some());
    }

    #[test]
    fn root_carries_the_total() {
        let (mut scene, _) = build("abracadabra").unwrap();
        play_through(&mut scene);
        let root = texts(&scene)
            .into_iter()
            .find(|(content, _)| content == "11")
            .unwrap();
        assert_eq!(root.1.y, ROOT_Y);
    }

    #[test]
    fn labels_sit_beside_their_edges() {
        let (mut scene, _) = build("aab").unwrap();
        play_through(&mut scene);

        let edges: Vec<Point> = scene
            .objects()
            .iter()
            .filter_map(|(_, object)| match &object.kind {
                ObjectKind::Line(line) => Some(line.midpoint()),
                _ => None,
            })
            .collect();
        assert_eq!(edges.len(), 2);

        let texts = texts(&scene);
        let zero = texts.iter().find(|(c, _)| c == "0").unwrap().1;
        let one = texts.iter().find(|(c, _)| c == "1").unwrap().1;
        assert_eq!(zero, edges[0] + Point::new(-LABEL_OFFSET, 0));
        assert_eq!(one, edges[1] + Point::new(LABEL_OFFSET, 0));
    }

    #[test]
    fn merged_children_sink_one_level() {
        let (mut scene, _) = build("aab").unwrap();
        play_through(&mut scene);
        let texts = texts(&scene);
        let leaf_b = texts.iter().find(|(c, _)| c == "b").unwrap().1;
        assert_eq!(leaf_b.y, ROOT_Y + LEVEL.y);
    }

    #[test]
    fn single_symbol_is_one_leaf() {
        let (scene, _) = build("zzz").unwrap();
        assert_eq!(scene.objects().len(), 3);
        assert_eq!(scene.length_in_frames(), LEAF_FADE + HOLD);
    }
}
