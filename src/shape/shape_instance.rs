#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// Per-instance flags of a collision shape.
pub struct ShapeFlags(u8);

bitflags::bitflags! {
    impl ShapeFlags: u8 {
        /// The shape takes part in simulation contacts (and thus in buoyancy).
        const SIMULATION = 1;
        /// The shape can be hit by scene queries.
        const QUERY = 1 << 1;
    }
}

impl Default for ShapeFlags {
    fn default() -> Self {
        ShapeFlags::SIMULATION | ShapeFlags::QUERY
    }
}

#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// A bit mask identifying collision groups.
pub struct Group(u32);

bitflags::bitflags! {
    impl Group: u32 {
        /// The group n°1.
        const GROUP_1 = 1;
        /// The group n°2.
        const GROUP_2 = 1 << 1;
        /// The group n°3.
        const GROUP_3 = 1 << 2;
        /// The group n°4.
        const GROUP_4 = 1 << 3;
        /// The group n°5.
        const GROUP_5 = 1 << 4;
        /// The group n°6.
        const GROUP_6 = 1 << 5;
        /// The group n°7.
        const GROUP_7 = 1 << 6;
        /// The group n°8.
        const GROUP_8 = 1 << 7;

        /// All of the groups.
        const ALL = u32::MAX;
        /// None of the groups.
        const NONE = 0;
    }
}

/// Pairwise filtering using bit masks.
///
/// Two shapes may interact only if each one's `memberships` intersects the
/// other one's `filter`.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct InteractionGroups {
    /// Groups memberships.
    pub memberships: Group,
    /// Groups filter.
    pub filter: Group,
}

impl InteractionGroups {
    /// Initializes with the given interaction groups and interaction mask.
    pub const fn new(memberships: Group, filter: Group) -> Self {
        Self {
            memberships,
            filter,
        }
    }

    /// Allow interaction with everything.
    pub const fn all() -> Self {
        Self::new(Group::ALL, Group::ALL)
    }

    /// Prevent all interactions.
    pub const fn none() -> Self {
        Self::new(Group::NONE, Group::NONE)
    }

    /// Check if interactions should be allowed based on the interaction memberships and filter.
    #[inline]
    pub fn test(self, rhs: Self) -> bool {
        self.memberships.intersects(rhs.filter) && rhs.memberships.intersects(self.filter)
    }
}

impl Default for InteractionGroups {
    fn default() -> Self {
        Self::all()
    }
}

/// The per-instance collision data attached to a root shape of a body.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ShapeInstance {
    /// The shape flags.
    pub flags: ShapeFlags,
    /// The collision groups of this shape.
    pub groups: InteractionGroups,
}

impl ShapeInstance {
    /// A shape instance with the given flags and groups.
    pub fn new(flags: ShapeFlags, groups: InteractionGroups) -> Self {
        Self { flags, groups }
    }
}
