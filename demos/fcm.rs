use cmeans::*;
use rand::prelude::*;

fn main() {
    let (instance_cnt, attribute_cnt, n_clusters) = (2000, 4, 3);

    // Generate some random data around three centers
    let mut rnd = rand::thread_rng();
    let centers = [[1.0f64, 2.0, 3.0, 4.0], [5.0, 1.0, 6.0, 2.0], [9.0, 9.0, 1.0, 7.0]];
    let mut samples = Matrix::new(instance_cnt, attribute_cnt);
    samples.iter_rows_mut().for_each(|row| {
        let center = centers.choose(&mut rnd).unwrap();
        row.iter_mut().zip(center.iter()).for_each(|(v, c)| *v = c + rnd.gen_range(-0.5..0.5));
    });
    let dataset = Dataset::from_matrix(samples).unwrap();

    // Calculate fuzzy c-means, using the random walk as initialization-method
    let fcm = FuzzyCMeans::new(&dataset);
    let result = fcm.fit(n_clusters, FuzzyCMeans::init_random_walk, &FuzzyCMeansConfig::default()).unwrap();

    println!("Centroids:\n{}", result);
    println!("Hard assignments: {:?}", &result.hard_assignments()[..20]);
    println!("Iterations: {} ({:?})", result.iterations, result.termination);
}
