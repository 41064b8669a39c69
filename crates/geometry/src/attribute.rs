/// A vertex channel that a shape may enable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Attribute {
    PositionMatrixIndex,
    Position,
    Normal,
    Color0,
    Color1,
    TexCoord0,
    TexCoord1,
    TexCoord2,
    TexCoord3,
    TexCoord4,
    TexCoord5,
    TexCoord6,
    TexCoord7,
}

impl Attribute {
    /// Returns the texture coordinate slot this attribute names, if any.
    pub fn tex_coord_slot(self) -> Option<usize> {
        match self {
            Attribute::TexCoord0 => Some(0),
            Attribute::TexCoord1 => Some(1),
            Attribute::TexCoord2 => Some(2),
            Attribute::TexCoord3 => Some(3),
            Attribute::TexCoord4 => Some(4),
            Attribute::TexCoord5 => Some(5),
            Attribute::TexCoord6 => Some(6),
            Attribute::TexCoord7 => Some(7),
            _ => None,
        }
    }

    /// Returns the color slot this attribute names, if any.
    pub fn color_slot(self) -> Option<usize> {
        match self {
            Attribute::Color0 => Some(0),
            Attribute::Color1 => Some(1),
            _ => None,
        }
    }
}

/// The ordered list of channels enabled for a shape.
///
/// Only the channels listed here take part in vertex equality when a shape is
/// baked. Order is insertion order and an attribute appears at most once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AttributeSet {
    attributes: Vec<Attribute>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self {
            attributes: Vec::new(),
        }
    }

    /// The minimal set most loaders start from.
    pub fn position_only() -> Self {
        Self {
            attributes: vec![Attribute::Position],
        }
    }

    /// Enables `attribute`. Returns false if it was already enabled.
    pub fn insert(&mut self, attribute: Attribute) -> bool {
        if self.contains(attribute) {
            return false;
        }
        self.attributes.push(attribute);
        true
    }

    pub fn contains(&self, attribute: Attribute) -> bool {
        self.attributes.contains(&attribute)
    }

    pub fn iter(&self) -> impl Iterator<Item = Attribute> + '_ {
        self.attributes.iter().copied()
    }

    pub fn as_slice(&self) -> &[Attribute] {
        self.attributes.as_slice()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl FromIterator<Attribute> for AttributeSet {
    fn from_iter<T: IntoIterator<Item = Attribute>>(iter: T) -> Self {
        let mut set = AttributeSet::new();
        for attribute in iter {
            set.insert(attribute);
        }
        set
    }
}

impl<'a> IntoIterator for &'a AttributeSet {
    type Item = Attribute;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Attribute>>;

    fn into_iter(self) -> Self::IntoIter {
        self.attributes.iter().copied()
    }
}
