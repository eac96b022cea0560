//! Tests for batch progress tracking

#[cfg(test)]
mod tests {
    use std::path::Path;
    use tilestamp::io::progress::ProgressManager;

    // Tests each completed item advances the bar once
    // Verified by incrementing on start_item as well
    #[test]
    fn test_progress_counts_completed_items() {
        let pm = ProgressManager::new(3);

        pm.start_item(Path::new("out/leaf_00.png"));
        pm.complete_item();
        pm.start_item(Path::new("out/leaf_01.png"));
        pm.complete_item();

        assert_eq!(pm.position(), 2);
        pm.finish();
    }

    // Tests empty batches
    #[test]
    fn test_empty_batch() {
        let pm = ProgressManager::new(0);
        pm.finish();
        assert_eq!(pm.position(), 0);
    }

    // Tests paths without a file name are accepted
    #[test]
    fn test_start_item_without_file_name() {
        let pm = ProgressManager::new(1);
        pm.start_item(Path::new("/"));
        pm.complete_item();
        assert_eq!(pm.position(), 1);
    }
}
