use cmeans::*;

fn main() {
    let (instance_cnt, attribute_cnt, n_clusters) = (5000, 8, 4);

    // Generate some random data
    let mut samples = Matrix::new(instance_cnt, attribute_cnt);
    samples.iter_rows_mut().for_each(|row| row.iter_mut().for_each(|v| *v = rand::random::<f64>()));
    let dataset = Dataset::from_matrix(samples).unwrap();

    let conf = FuzzyCMeansConfig::build()
        .init_done(&|_| println!("Initialization completed."))
        .iteration_done(&|_, nr, delta: f64| println!("Iteration {} - Partition delta: {:.6}", nr, delta))
        .abort_strategy(AbortStrategy::PartitionDeltaOrMaxIterations { epsilon: 0.0005, max_iter: 200 })
        .build();

    let result = FuzzyCMeans::new(&dataset).fit(n_clusters, FuzzyCMeans::init_row_normalized, &conf).unwrap();
    println!("Centroids:\n{}", result);
}
