use crate::shared::*;

/// Populate the CropRegistry with all crop definitions.
///
/// `growth_frames` is the number of sprite frames from seedling to ripe; a
/// crop is harvestable once its age reaches `growth_frames - 1`.
///
///   corn:   5 frames, +1.0 age per watered day, ripe after 4 watered days
///   tomato: 4 frames, +0.7 age per watered day, ripe after 5 watered days
pub fn populate_crops(registry: &mut CropRegistry) {
    let crops: Vec<CropDef> = vec![
        CropDef {
            id: "corn".into(),
            name: "Corn".into(),
            growth_frames: 5,
            growth_rate: 1.0,
            // Tall stalks sit higher on the tile.
            y_offset: 16.0,
        },
        CropDef {
            id: "tomato".into(),
            name: "Tomato".into(),
            growth_frames: 4,
            growth_rate: 0.7,
            y_offset: 8.0,
        },
    ];

    for crop in crops {
        registry.crops.insert(crop.id.clone(), crop);
    }
}
