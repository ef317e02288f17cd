//! Fixed-step ODE integration.

/// One explicit Euler step: `s + ds * dt`.
pub fn euler_step<const N: usize>(s: &[f64; N], ds: &[f64; N], dt: f64) -> [f64; N] {
    let mut next = *s;
    for (x, dx) in next.iter_mut().zip(ds) {
        *x += dx * dt;
    }
    next
}

/// One classical fourth-order Runge-Kutta step of `ds/dt = f(s)` over `dt`.
pub fn rk4_step<const N: usize, F>(s: &[f64; N], dt: f64, f: F) -> [f64; N]
where
    F: Fn(&[f64; N]) -> [f64; N],
{
    let k1 = f(s);
    let k2 = f(&euler_step(s, &k1, dt / 2.0));
    let k3 = f(&euler_step(s, &k2, dt / 2.0));
    let k4 = f(&euler_step(s, &k3, dt));

    let mut next = *s;
    for i in 0..N {
        next[i] += (k1[i] + 2.0 * k2[i] + 2.0 * k3[i] + k4[i]) * dt / 6.0;
    }
    next
}
