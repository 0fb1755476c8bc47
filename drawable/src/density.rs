/// An android screen density bucket and the notification icon size it loads.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DensityTarget {
    pub name: &'static str,
    pub size: u32,
}

impl DensityTarget {
    pub const fn new(name: &'static str, size: u32) -> Self {
        Self { name, size }
    }
}

impl std::fmt::Display for DensityTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} ({}x{}px)", self.name, self.size, self.size)
    }
}

/// Notification icons are 24dp, half the size of a launcher icon.
pub const DPI_SIZE: [u32; 5] = [24, 36, 48, 72, 96];

pub const NOTIFICATION_DENSITIES: [DensityTarget; 5] = [
    DensityTarget::new("drawable-mdpi", DPI_SIZE[0]),
    DensityTarget::new("drawable-hdpi", DPI_SIZE[1]),
    DensityTarget::new("drawable-xhdpi", DPI_SIZE[2]),
    DensityTarget::new("drawable-xxhdpi", DPI_SIZE[3]),
    DensityTarget::new("drawable-xxxhdpi", DPI_SIZE[4]),
];
