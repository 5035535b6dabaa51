mod bounds_clipping;
mod cube_scenarios;
mod intersection_ring;
mod stacked_waters;
