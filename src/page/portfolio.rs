use crate::{
    animation::{ease::Ease, transition::TransitionSpec},
    conveyor::lane::Direction,
    foundation::{
        core::{Canvas, Rect, Size},
        error::ReelResult,
    },
    media::item::AssetRef,
    page::{
        dsl::{PageBuilder, RowBuilder},
        gif_layout::GifLayoutPatch,
        model::{
            ConveyorSection, GifGrid, Hero, ImageBox, ImageLayer, Justify, LaneSpec, OverlayPatch,
            Page, RevealStack,
        },
    },
    visibility::tracker::TrackingMode,
};

/// Page width.
pub const SECTION_WIDTH: u32 = 1920;
/// Height of one full screen section.
pub const SECTION_HEIGHT: u32 = 1080;
/// Total scroll height.
pub const TOTAL_HEIGHT: u32 = 8192;

/// Videos of the forward conveyor lane.
pub const SHOWCASE_NAMES: [&str; 10] = [
    "space", "ouch", "watch", "timeless", "tonka", "plain", "jazz", "clouds", "funny", "end",
];
/// Videos of the reverse conveyor lane.
pub const REVERSE_NAMES: [&str; 10] = [
    "24", "water", "fire", "rohan", "kanye", "bl", "screen", "joseph", "tame", "trance",
];
/// GIF overlays in grid order.
pub const OVERLAY_GIFS: [&str; 4] = ["darkless", "a0", "vinnie", "strive"];

const ABOUT_IMAGES: usize = 7;

fn png(name: &str) -> AssetRef {
    AssetRef::Png(name.to_string())
}

fn layer(name: &str, top: f64) -> ImageLayer {
    ImageLayer {
        asset: png(name),
        top,
        left: 0.0,
        size: Size::new(1920.0, 2160.0),
        z: 0,
    }
}

impl Page {
    /// The built-in portfolio page.
    pub fn portfolio() -> ReelResult<Self> {
        let width = f64::from(SECTION_WIDTH);
        let section = f64::from(SECTION_HEIGHT);

        let hero = Hero {
            height: section,
            logo: ImageBox {
                asset: png("logo"),
                rect: Rect::new(32.0, 32.0, 182.0, 182.0),
            },
            // 1200x600 source capped at 1024 px wide, centered in the section.
            title: ImageBox {
                asset: png("portfolio"),
                rect: Rect::new(448.0, 284.0, 1472.0, 796.0),
            },
        };

        let reveal = RevealStack {
            top: section,
            height: section,
            image: Size::new(1280.0, 720.0),
            images: (1..=ABOUT_IMAGES)
                .rev()
                .map(|n| png(&format!("about_me_{n}")))
                .collect(),
            transition: TransitionSpec::new(1000, Ease::Out),
            stagger_ms: 150,
            rise_px: 64.0,
            tracking: TrackingMode::default(),
        };

        let conveyors = ConveyorSection {
            top: 2200.0,
            cell: Size::new(384.0, 216.0),
            gap_px: 16.0,
            lane_spacing_px: 32.0,
            period_ms: 39_000,
            lanes: vec![
                LaneSpec {
                    names: SHOWCASE_NAMES.iter().map(|s| s.to_string()).collect(),
                    direction: Direction::Forward,
                },
                LaneSpec {
                    names: REVERSE_NAMES.iter().map(|s| s.to_string()).collect(),
                    direction: Direction::Reverse,
                },
            ],
            tracking: TrackingMode::default(),
        };

        let overlays = GifGrid {
            top: 2792.0,
            left: 16.0,
            columns: 4,
            gap_px: 32.0,
            cell: Size::new(448.0, 448.0),
            items: OVERLAY_GIFS
                .iter()
                .map(|s| AssetRef::Gif(s.to_string()))
                .collect(),
            patches: vec![
                OverlayPatch {
                    index: 0,
                    patch: GifLayoutPatch::full(1.5, 196.0, 42.0),
                },
                OverlayPatch {
                    index: 1,
                    patch: GifLayoutPatch::full(1.5, 764.0, 550.0),
                },
                OverlayPatch {
                    index: 2,
                    patch: GifLayoutPatch::full(1.75, 250.0, 3075.0),
                },
                OverlayPatch {
                    index: 3,
                    patch: GifLayoutPatch::full(0.0, 0.0, 0.0),
                },
            ],
        };

        PageBuilder::new(Canvas::new(SECTION_WIDTH, TOTAL_HEIGHT)?)
            .backdrop(ImageBox {
                asset: AssetRef::Gif("size".into()),
                rect: Rect::new(0.0, 0.0, width, section),
            })
            .hero(hero)
            .reveal(reveal)
            .conveyors(conveyors)
            .row(
                RowBuilder::new("row", 3775.0, &["row1", "row2", "row3", "row4"])
                    .width_frac(0.2)
                    .max_width(384.0)
                    .gap(24.0)
                    .build()?,
            )
            .row(
                RowBuilder::new(
                    "vertical",
                    5190.0,
                    &["vertical1", "vertical2", "vertical3", "vertical4", "vertical5"],
                )
                .width_frac(0.15)
                .aspect(9.0, 16.0)
                .justify(Justify::Evenly)
                .build()?,
            )
            .row(
                RowBuilder::new("square", 7160.0, &["square1", "square2", "square3"])
                    .left(-90.0)
                    .width_frac(0.1)
                    .max_width(200.0)
                    .aspect(1.0, 1.0)
                    .gap(8.0)
                    .round()
                    .build()?,
            )
            .row(
                RowBuilder::new("indep", 7550.0, &["indep1", "indep2", "indep3"])
                    .width_frac(0.25)
                    .max_width(384.0)
                    .build()?,
            )
            .layer(layer("personalwork", 2530.0))
            .layer(layer("connected", 4150.0))
            .layer(layer("extended", 6310.0))
            .layer(layer("final", 8470.0))
            .overlays(overlays)
            .build()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/page/portfolio.rs"]
mod tests;
