pub mod test_geometry;
