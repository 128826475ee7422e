/// Paint layer for draw items. Lower layers are painted first.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Default)]
pub struct Layer(pub i32);

impl Layer {
    pub const BACKGROUND: Layer = Layer(-1);
    pub const SCENE: Layer = Layer(0);

    #[inline]
    pub const fn new(v: i32) -> Self {
        Self(v)
    }
}
