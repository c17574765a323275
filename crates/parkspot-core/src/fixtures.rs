// Sample lot snapshot used by unit tests.

use crate::model::LotOccupancy;

pub(crate) fn sample_lots() -> Vec<LotOccupancy> {
    vec![
        LotOccupancy::new("Parking Lot 2", 34, 70).with_priority(true),
        LotOccupancy::new("Parking Lot 3", 32, 40),
        LotOccupancy::new("Parking Lot 4", 30, 100),
        LotOccupancy::new("Parking Lot 5", 28, 280).with_priority(true),
        LotOccupancy::new("Parking Lot 6", 22, 75),
        LotOccupancy::new("Parking Lot 7", 20, 30),
        LotOccupancy::new("Parking Lot 8", 3, 100).with_priority(true),
    ]
}
